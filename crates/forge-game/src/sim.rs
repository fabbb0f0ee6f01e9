//! The simulation context
//!
//! One explicit object owns all combat state and is advanced by the host's
//! per-frame callback. Mutation order within a tick is fixed and
//! significant: (1) resource recharge and presentation timers, (2)
//! per-monster animation-cycle evaluation (which may damage the hero),
//! (3) hero auto-attack (which may interrupt a stand set in step 2), (4)
//! death-transition sweep, (5) wave-clear check.

use forge_core::MonsterId;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use uuid::Uuid;

use crate::action::Action;
use crate::cycle::{advance_monster, CycleOutcome};
use crate::damage::{roll_damage, DamageNumbers};
use crate::film::FilmStore;
use crate::freeze::UiFlags;
use crate::hero::Hero;
use crate::monster::Monster;
use crate::resolver::{hero_auto_attack, skill_burst, AutoAttack, PendingSkillBurst};
use crate::skill::SkillTable;
use crate::tables::{BaseStatsTable, DurationTable, FormationTable};
use crate::wave::{spawn_count, spawn_wave, Stage, WaveMachine};

/// What the renderer needs for one monster
#[derive(Debug, Clone)]
pub struct MonsterView {
    pub id: MonsterId,
    pub name: String,
    /// Animation key, e.g. `"stand"`, `"attack1"`
    pub action: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub anim_offset: Vec2,
}

/// What the renderer needs for the hero
#[derive(Debug, Clone)]
pub struct HeroView {
    pub character_action: String,
    /// Changes on every (re)trigger so sprite playback restarts
    pub action_instance: Uuid,
}

/// The complete combat simulation state
pub struct Simulation {
    pub hero: Hero,
    pub monsters: Vec<Monster>,
    pub wave: WaveMachine,
    pub film: FilmStore,
    /// UI flags read by the freeze coordinator; the UI layer writes them
    pub ui: UiFlags,
    pub damage_numbers: DamageNumbers,
    /// Monsters killed this session
    pub kills: u64,
    /// Suppresses the auto-attack for manual/dev control
    pub manual_control: bool,

    auto_attack: AutoAttack,
    pending_bursts: Vec<PendingSkillBurst>,
    durations: DurationTable,
    formations: FormationTable,
    base_stats: BaseStatsTable,
    skills: SkillTable,
    rng: StdRng,
    next_monster_id: u64,
    last_tick_ms: Option<f64>,
}

impl Simulation {
    /// Create a simulation with the built-in tables and a seeded rng
    pub fn new(seed: u64) -> Self {
        Self::with_tables(
            seed,
            DurationTable::builtin(),
            FormationTable::builtin(),
            BaseStatsTable::builtin(),
            SkillTable::builtin(),
        )
    }

    /// Create a simulation with explicit configuration tables
    pub fn with_tables(
        seed: u64,
        durations: DurationTable,
        formations: FormationTable,
        base_stats: BaseStatsTable,
        skills: SkillTable,
    ) -> Self {
        Self {
            hero: Hero::default(),
            monsters: Vec::new(),
            wave: WaveMachine::default(),
            film: FilmStore::default(),
            ui: UiFlags::default(),
            damage_numbers: DamageNumbers::default(),
            kills: 0,
            manual_control: false,
            auto_attack: AutoAttack::default(),
            pending_bursts: Vec::new(),
            durations,
            formations,
            base_stats,
            skills,
            rng: StdRng::seed_from_u64(seed),
            next_monster_id: 1,
            last_tick_ms: None,
        }
    }

    /// Whether combat progression is suspended this tick
    pub fn is_frozen(&self) -> bool {
        self.ui.is_frozen()
    }

    /// Advance the simulation to the given timestamp.
    ///
    /// Runs to completion once started; the host re-arms the next tick
    /// unconditionally.
    pub fn tick(&mut self, now_ms: f64) {
        self.wave.mark_started(now_ms);

        // (1) Resource recharge and presentation timers. These keep
        // running even after game over.
        self.film.recharge(now_ms);
        self.damage_numbers.update(now_ms);
        self.hero.update(now_ms);

        if self.wave.stage == Stage::GameOver {
            self.last_tick_ms = Some(now_ms);
            return;
        }

        self.fire_due_skill_bursts(now_ms);

        let delta_secs = match self.last_tick_ms {
            Some(last) => ((now_ms - last).max(0.0) / 1000.0) as f32,
            None => 0.0,
        };

        match self.wave.stage {
            Stage::Spawning => self.step_spawning(now_ms),
            Stage::Walking => self.step_walking(delta_secs, now_ms),
            Stage::Fighting => self.step_fighting(now_ms),
            Stage::Cleared => {
                // No cooldown: escalate and respawn immediately
                self.wave.next_wave();
                self.step_spawning(now_ms);
            }
            Stage::GameOver => {}
        }

        self.last_tick_ms = Some(now_ms);
    }

    fn step_spawning(&mut self, now_ms: f64) {
        let count = spawn_count(self.wave.wave, &mut self.rng);
        self.monsters = spawn_wave(
            self.wave.wave,
            count,
            &self.base_stats,
            &self.formations,
            &mut self.next_monster_id,
            &mut self.rng,
            now_ms,
        );
        self.wave.stage = Stage::Walking;
    }

    fn step_walking(&mut self, delta_secs: f32, now_ms: f64) {
        if self.is_frozen() {
            // Never leave a monster mid-walk
            for monster in &mut self.monsters {
                if monster.action == Action::Move {
                    monster.set_action(Action::Stand, now_ms);
                }
            }
            return;
        }

        for monster in &mut self.monsters {
            if monster.at_target() {
                continue;
            }
            if monster.action != Action::Move {
                monster.set_action(Action::Move, now_ms);
            }
            monster.step_toward_target(delta_secs);
        }

        if self.monsters.iter().all(|m| m.at_target()) {
            for monster in &mut self.monsters {
                monster.set_action(Action::Stand, now_ms);
            }
            info!(wave = self.wave.wave, "wave in formation, fighting");
            self.wave.stage = Stage::Fighting;
        }
    }

    fn step_fighting(&mut self, now_ms: f64) {
        let frozen = self.is_frozen();

        // (2) Animation-cycle evaluation. Collect attackers and finished
        // deaths; monster damage to the hero lands at the instant of the
        // attack transition.
        let mut removed: Vec<MonsterId> = Vec::new();
        let mut attackers: Vec<(u32, f32, f32)> = Vec::new();
        for monster in &mut self.monsters {
            match advance_monster(monster, &self.durations, frozen, now_ms) {
                CycleOutcome::Remove => removed.push(monster.id),
                CycleOutcome::Attack => attackers.push((
                    monster.stats.atk,
                    monster.stats.crit_rate,
                    monster.stats.crit_dmg,
                )),
                CycleOutcome::None => {}
            }
        }

        if !removed.is_empty() {
            self.monsters.retain(|m| !removed.contains(&m.id));
            self.kills += removed.len() as u64;
            for id in &removed {
                info!(%id, kills = self.kills, "monster defeated");
            }
        }

        for (atk, crit_rate, crit_dmg) in attackers {
            let event = roll_damage(
                atk,
                crit_rate,
                crit_dmg,
                self.hero.stats.def,
                &mut self.rng,
            );
            self.hero.stats.apply_damage(event.amount);
        }
        if !self.hero.is_alive() {
            self.wave.game_over(now_ms);
            self.auto_attack.clear();
            return;
        }

        // (3) Hero auto-attack
        if !frozen && !self.manual_control {
            hero_auto_attack(
                &mut self.auto_attack,
                &mut self.hero,
                &mut self.monsters,
                &mut self.damage_numbers,
                &mut self.rng,
                now_ms,
            );
        }

        // (4) Death sweep: zero HP interrupts everything except an
        // already-playing death
        for monster in &mut self.monsters {
            if !monster.stats.is_alive() && !monster.is_dying() {
                monster.force_die(now_ms);
            }
        }

        // (5) Wave-clear check
        if self.monsters.is_empty() {
            info!(wave = self.wave.wave, "wave cleared");
            self.wave.stage = Stage::Cleared;
            self.auto_attack.clear();
        }
    }

    /// Queue an ultimate skill: the AOE burst lands once the skill's
    /// visual duration has played out
    pub fn trigger_skill(&mut self, skill: &str, now_ms: f64) {
        let fire_at_ms = now_ms + self.skills.duration_ms(skill);
        info!(skill, fire_at_ms, "skill triggered");
        self.pending_bursts.push(PendingSkillBurst {
            skill: skill.to_string(),
            fire_at_ms,
        });
    }

    fn fire_due_skill_bursts(&mut self, now_ms: f64) {
        if self.pending_bursts.is_empty() {
            return;
        }
        let due: Vec<PendingSkillBurst> = {
            let (due, pending) = self
                .pending_bursts
                .drain(..)
                .partition(|b| b.fire_at_ms <= now_ms);
            self.pending_bursts = pending;
            due
        };
        for burst in due {
            let hits = skill_burst(
                &self.hero,
                &mut self.monsters,
                &mut self.damage_numbers,
                &mut self.rng,
                now_ms,
            );
            info!(skill = %burst.skill, hits, "skill burst");
        }
    }

    /// Spawn a specific wave on demand (dev panel)
    pub fn debug_spawn_wave(&mut self, species: &str, count: u32, now_ms: f64) {
        let def = self.base_stats.get(species);
        let slots = self.formations.get(count);
        let mut monsters = Vec::with_capacity(count as usize);
        for i in 0..count as usize {
            let slot = slots
                .get(i)
                .or_else(|| slots.last())
                .copied()
                .unwrap_or(crate::tables::FormationSlot::new(70.0, 62.0));
            let id = MonsterId(self.next_monster_id);
            self.next_monster_id += 1;
            monsters.push(Monster::spawn(
                id,
                species,
                &def,
                108.0 + i as f32 * 8.0,
                slot,
                now_ms,
            ));
        }
        self.monsters = monsters;
        self.wave.stage = Stage::Walking;
        self.auto_attack.clear();
    }

    /// Remove every monster without counting kills (dev panel)
    pub fn debug_clear_monsters(&mut self) {
        self.monsters.clear();
        self.auto_attack.clear();
    }

    /// Play a random hero attack animation (dev panel)
    pub fn debug_trigger_character_attack(&mut self, now_ms: f64) {
        self.hero.play_attack_animation(&mut self.rng, now_ms);
    }

    /// Per-monster render data
    pub fn monster_views(&self) -> Vec<MonsterView> {
        self.monsters
            .iter()
            .map(|m| MonsterView {
                id: m.id,
                name: m.species.clone(),
                action: m.action.key(),
                x: m.x,
                y: m.y,
                scale: m.stats.scale,
                anim_offset: m.anim_offset,
            })
            .collect()
    }

    /// Hero render data
    pub fn hero_view(&self) -> HeroView {
        HeroView {
            character_action: self.hero.character_action.clone(),
            action_instance: self.hero.action_instance,
        }
    }
}

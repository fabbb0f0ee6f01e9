//! Combat resolver: hero auto-attack, target selection, hit application
//!
//! Targeting is sticky-then-sequential: once a target is locked, the hero
//! keeps attacking it until it dies or becomes invalid, then locks the
//! first live, non-dying monster in iteration order.

use forge_core::MonsterId;
use glam::Vec2;
use rand::Rng;

use crate::action::Action;
use crate::damage::{roll_damage, DamageEvent, DamageNumbers};
use crate::hero::Hero;
use crate::monster::Monster;

/// Hero auto-attack state held outside the persisted hero data
#[derive(Debug, Clone, Default)]
pub struct AutoAttack {
    /// When the last auto-attack fired
    last_attack_ms: Option<f64>,
    /// Sticky target lock
    current_target: Option<MonsterId>,
}

impl AutoAttack {
    /// Whether the cooldown has elapsed
    pub fn ready(&self, hero: &Hero, now_ms: f64) -> bool {
        match self.last_attack_ms {
            Some(last) => now_ms - last >= hero.attack_cooldown_ms(),
            None => true,
        }
    }

    /// Currently locked target, if any
    pub fn target(&self) -> Option<MonsterId> {
        self.current_target
    }

    /// Keep the locked target while it is still valid, otherwise lock the
    /// first targetable monster in iteration order
    fn select_target(&mut self, monsters: &[Monster]) -> Option<usize> {
        if let Some(id) = self.current_target {
            if let Some(index) = monsters
                .iter()
                .position(|m| m.id == id && m.is_targetable())
            {
                return Some(index);
            }
        }
        let index = monsters.iter().position(|m| m.is_targetable());
        self.current_target = index.map(|i| monsters[i].id);
        index
    }

    /// Drop the lock (wave cleared, game over)
    pub fn clear(&mut self) {
        self.current_target = None;
        self.last_attack_ms = None;
    }
}

/// Land a resolved hit on a monster and redirect its animation state.
///
/// A standing target is interrupted into its hit reaction (which costs it
/// the attack charge accumulated so far, since every action transition
/// resets the cycle count); a target mid-attack only records the hit
/// timestamp so the reaction can be spliced in when the attack animation
/// completes. A dying target is never touched.
pub fn apply_hit_to_monster(monster: &mut Monster, event: DamageEvent, now_ms: f64) -> bool {
    if !monster.is_targetable() {
        return false;
    }
    monster.stats.apply_damage(event.amount);
    match monster.action {
        Action::Stand => {
            monster.stand_cycles = 0;
            monster.set_action(Action::Hit(1), now_ms);
        }
        Action::Attack(_) => {
            monster.last_hit_ms = Some(now_ms);
        }
        // Mid-hit, mid-move: HP loss only, the playing animation keeps
        // going
        _ => {}
    }
    true
}

/// Run one hero auto-attack evaluation.
///
/// Fires at most once per call, when the cooldown is ready and a target
/// exists. Returns the target id and damage dealt.
pub fn hero_auto_attack(
    auto: &mut AutoAttack,
    hero: &mut Hero,
    monsters: &mut [Monster],
    numbers: &mut DamageNumbers,
    rng: &mut impl Rng,
    now_ms: f64,
) -> Option<(MonsterId, DamageEvent)> {
    if !auto.ready(hero, now_ms) {
        return None;
    }
    let index = auto.select_target(monsters)?;
    auto.last_attack_ms = Some(now_ms);

    let event = roll_damage(
        hero.stats.atk,
        hero.stats.crit_rate,
        hero.stats.crit_dmg,
        monsters[index].stats.def,
        rng,
    );
    let target = &mut monsters[index];
    let pos = Vec2::new(target.x, target.y);
    apply_hit_to_monster(target, event, now_ms);
    numbers.push(event, pos, now_ms);
    hero.play_attack_animation(rng, now_ms);

    Some((target.id, event))
}

/// Flat attack multiplier for ultimate-skill bursts
pub const SKILL_ATTACK_MULTIPLIER: f32 = 5.0;

/// An ultimate skill waiting for its visual to finish before the damage
/// lands
#[derive(Debug, Clone)]
pub struct PendingSkillBurst {
    pub skill: String,
    pub fire_at_ms: f64,
}

/// Apply one AOE burst: the boosted hero attack through the normal damage
/// formula, once per live monster against its own defense, each with an
/// independent crit roll.
pub fn skill_burst(
    hero: &Hero,
    monsters: &mut [Monster],
    numbers: &mut DamageNumbers,
    rng: &mut impl Rng,
    now_ms: f64,
) -> u32 {
    let burst_atk = (hero.stats.atk as f32 * SKILL_ATTACK_MULTIPLIER) as u32;
    let mut hits = 0;
    for monster in monsters.iter_mut() {
        if !monster.is_targetable() {
            continue;
        }
        let event = roll_damage(
            burst_atk,
            hero.stats.crit_rate,
            hero.stats.crit_dmg,
            monster.stats.def,
            rng,
        );
        let pos = Vec2::new(monster.x, monster.y);
        apply_hit_to_monster(monster, event, now_ms);
        numbers.push(event, pos, now_ms);
        hits += 1;
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::EntityStats;
    use crate::tables::{FormationSlot, SpeciesDef};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn monster(id: u64) -> Monster {
        let def = SpeciesDef {
            stats: EntityStats::new(1000, 10, 0),
            charge_cycles: 3,
            ..Default::default()
        };
        let mut m = Monster::spawn(
            MonsterId(id),
            "goblin",
            &def,
            70.0,
            FormationSlot::new(70.0, 62.0),
            0.0,
        );
        m.set_action(Action::Stand, 0.0);
        m
    }

    fn hero() -> Hero {
        Hero::new(
            EntityStats {
                max_hp: 1000,
                hp: 1000,
                atk: 100,
                def: 0,
                crit_rate: 0.0,
                crit_dmg: 1.5,
                ..Default::default()
            },
            2.0, // 500ms cooldown
        )
    }

    #[test]
    fn test_sticky_targeting() {
        let mut auto = AutoAttack::default();
        let mut hero = hero();
        let mut monsters = vec![monster(1), monster(2)];
        let mut numbers = DamageNumbers::default();
        let mut rng = StdRng::seed_from_u64(3);

        let (first, _) =
            hero_auto_attack(&mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, 0.0)
                .unwrap();
        assert_eq!(first, MonsterId(1));

        // Stays locked on A across cooldown ticks even though B exists
        for i in 1..5 {
            let now = i as f64 * 500.0;
            let (target, _) = hero_auto_attack(
                &mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, now,
            )
            .unwrap();
            assert_eq!(target, MonsterId(1));
        }

        // A dies; the lock moves to the next monster in iteration order
        monsters[0].force_die(2500.0);
        let (target, _) = hero_auto_attack(
            &mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, 3000.0,
        )
        .unwrap();
        assert_eq!(target, MonsterId(2));
    }

    #[test]
    fn test_cooldown_gates_attacks() {
        let mut auto = AutoAttack::default();
        let mut hero = hero();
        let mut monsters = vec![monster(1)];
        let mut numbers = DamageNumbers::default();
        let mut rng = StdRng::seed_from_u64(4);

        assert!(hero_auto_attack(
            &mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, 0.0
        )
        .is_some());
        assert!(hero_auto_attack(
            &mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, 499.0
        )
        .is_none());
        assert!(hero_auto_attack(
            &mut auto, &mut hero, &mut monsters, &mut numbers, &mut rng, 500.0
        )
        .is_some());
    }

    #[test]
    fn test_standing_target_interrupted_into_hit() {
        let mut m = monster(1);
        m.stand_cycles = 2;
        let event = DamageEvent { amount: 50, is_crit: false };
        assert!(apply_hit_to_monster(&mut m, event, 100.0));
        assert_eq!(m.action, Action::Hit(1));
        // The interruption costs the accumulated attack charge
        assert_eq!(m.stand_cycles, 0);
        assert_eq!(m.stats.hp, 950);
    }

    #[test]
    fn test_attacking_target_defers_hit() {
        let mut m = monster(1);
        m.set_action(Action::Attack(1), 0.0);
        let event = DamageEvent { amount: 50, is_crit: false };
        assert!(apply_hit_to_monster(&mut m, event, 321.0));
        assert_eq!(m.action, Action::Attack(1));
        assert_eq!(m.last_hit_ms, Some(321.0));
        assert_eq!(m.stats.hp, 950);
    }

    #[test]
    fn test_dying_target_untouchable() {
        let mut m = monster(1);
        m.force_die(0.0);
        let hp = m.stats.hp;
        let event = DamageEvent { amount: 50, is_crit: false };
        assert!(!apply_hit_to_monster(&mut m, event, 100.0));
        assert_eq!(m.stats.hp, hp);
    }

    #[test]
    fn test_skill_burst_hits_every_live_monster_once() {
        let hero = hero();
        let mut monsters = vec![monster(1), monster(2), monster(3)];
        monsters[1].force_die(0.0);
        let mut numbers = DamageNumbers::default();
        let mut rng = StdRng::seed_from_u64(5);

        let hits = skill_burst(&hero, &mut monsters, &mut numbers, &mut rng, 0.0);
        assert_eq!(hits, 2);
        assert!(monsters[0].stats.hp < 1000);
        assert_eq!(monsters[1].stats.hp, 1000); // dying: untouched
        assert!(monsters[2].stats.hp < 1000);
        assert_eq!(numbers.len(), 2);
    }
}

//! Wave lifecycle state machine
//!
//! Waves loop indefinitely with escalating difficulty:
//! spawning -> walking -> fighting -> cleared -> spawning (wave + 1),
//! with an absorbing game-over state once the hero falls.

use forge_core::MonsterId;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::monster::Monster;
use crate::tables::{BaseStatsTable, FormationTable};

/// Horizontal percent where the first spawned monster starts, off-screen
/// right
const SPAWN_START_X: f32 = 108.0;
/// Stagger between consecutive spawns so the pack walks in single file
const SPAWN_STAGGER_X: f32 = 8.0;

/// Wave lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Instantiating the next wave's monsters
    Spawning,
    /// Monsters walking into formation
    Walking,
    /// Combat running
    Fighting,
    /// Wave defeated; difficulty about to escalate
    Cleared,
    /// Hero down. Absorbing: no further combat processing.
    GameOver,
}

/// Top-level wave controller
#[derive(Debug, Clone)]
pub struct WaveMachine {
    pub stage: Stage,
    /// Current wave number, starting at 1
    pub wave: u32,
    /// When the machine started, for the survival clock
    started_ms: Option<f64>,
    /// Wall-clock survival time, recorded at game over
    pub survival_ms: Option<f64>,
}

impl Default for WaveMachine {
    fn default() -> Self {
        Self {
            stage: Stage::Spawning,
            wave: 1,
            started_ms: None,
            survival_ms: None,
        }
    }
}

impl WaveMachine {
    /// Record the machine's start on the first tick
    pub fn mark_started(&mut self, now_ms: f64) {
        if self.started_ms.is_none() {
            self.started_ms = Some(now_ms);
        }
    }

    /// Enter the absorbing game-over state, recording survival time
    pub fn game_over(&mut self, now_ms: f64) {
        if self.stage == Stage::GameOver {
            return;
        }
        self.stage = Stage::GameOver;
        self.survival_ms = Some(now_ms - self.started_ms.unwrap_or(now_ms));
        info!(
            wave = self.wave,
            survival_secs = self.survival_ms.unwrap_or(0.0) / 1000.0,
            "game over"
        );
    }

    /// Advance to the next wave after a clear
    pub fn next_wave(&mut self) {
        self.wave += 1;
        self.stage = Stage::Spawning;
    }
}

/// Number of monsters for a wave: grows with the wave number, with a
/// random 0/1 jitter, clamped to 1-5
pub fn spawn_count(wave: u32, rng: &mut impl Rng) -> u32 {
    let jitter: u32 = rng.gen_range(0..=1);
    (wave / 2 + jitter).clamp(1, 5)
}

/// Build one wave's monsters: one random species for the whole wave,
/// stats scaled by the wave number, placed by the formation table (with
/// the 1-monster fallback) at staggered off-screen start positions.
pub fn spawn_wave(
    wave: u32,
    count: u32,
    base_stats: &BaseStatsTable,
    formations: &FormationTable,
    next_id: &mut u64,
    rng: &mut impl Rng,
    now_ms: f64,
) -> Vec<Monster> {
    let names = base_stats.species_names();
    let species = names
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| "goblin".to_string());

    let mut def = base_stats.get(&species);
    def.stats = def.stats.scaled_for_wave(wave);

    let slots = formations.get(count);
    let mut monsters = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        // A formation shorter than the spawn count reuses its last slot
        let slot = slots
            .get(i)
            .or_else(|| slots.last())
            .copied()
            .unwrap_or(crate::tables::FormationSlot::new(70.0, 62.0));
        let id = MonsterId(*next_id);
        *next_id += 1;
        let start_x = SPAWN_START_X + i as f32 * SPAWN_STAGGER_X;
        monsters.push(Monster::spawn(id, &species, &def, start_x, slot, now_ms));
    }

    info!(wave, count, species = %species, "wave spawned");
    monsters
}

//! Forge Game - Wave-combat simulation
//!
//! Provides the per-frame combat simulation: wave lifecycle, monster
//! animation cycles, the hero auto-attack resolver, ultimate skills, and
//! the freeze coordinator that suspends combat while UI overlays are up.

pub mod action;
pub mod cycle;
pub mod damage;
pub mod film;
pub mod freeze;
pub mod hero;
pub mod monster;
pub mod resolver;
pub mod sim;
pub mod skill;
pub mod stats;
pub mod tables;
pub mod wave;

pub use action::Action;
pub use cycle::{advance_monster, CycleOutcome};
pub use damage::{
    resolve_damage, roll_damage, DamageEvent, DamageNumber, DamageNumbers,
    DAMAGE_NUMBER_LIFETIME_MS,
};
pub use film::{FilmStore, FILM_RECHARGE_INTERVAL_MS};
pub use freeze::UiFlags;
pub use hero::{hero_action_duration_ms, Hero, HERO_ATTACK_ANIMATIONS, HERO_IDLE_ACTION};
pub use monster::Monster;
pub use resolver::{
    apply_hit_to_monster, hero_auto_attack, skill_burst, AutoAttack, PendingSkillBurst,
    SKILL_ATTACK_MULTIPLIER,
};
pub use sim::{HeroView, MonsterView, Simulation};
pub use skill::{SkillTable, DEFAULT_SKILL_DURATION_MS};
pub use stats::EntityStats;
pub use tables::{BaseStatsTable, DurationTable, FormationSlot, FormationTable, SpeciesDef};
pub use wave::{spawn_count, spawn_wave, Stage, WaveMachine};

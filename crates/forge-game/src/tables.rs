//! Static configuration tables: animation durations, formations, base stats
//!
//! Every lookup is a total function. A missing key never stalls the loop:
//! durations fall back to [`DEFAULT_DURATION_MS`], formations to the
//! 1-monster layout, species stats to [`SpeciesDef::default`].

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::stats::EntityStats;

/// Duration assumed for any (species, action) pair missing from the table
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Per-species animation durations in milliseconds, keyed by action key
/// (`"stand"`, `"attack1"`, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationTable {
    species: HashMap<String, HashMap<String, f64>>,
}

impl DurationTable {
    /// Duration of an action for a species; defaults when either key is
    /// missing
    pub fn get(&self, species: &str, action_key: &str) -> f64 {
        self.species
            .get(species)
            .and_then(|actions| actions.get(action_key))
            .copied()
            .unwrap_or(DEFAULT_DURATION_MS)
    }

    /// Set the duration of one action for one species
    pub fn set(&mut self, species: &str, action_key: &str, duration_ms: f64) {
        self.species
            .entry(species.to_string())
            .or_default()
            .insert(action_key.to_string(), duration_ms);
    }

    /// Built-in durations for the shipped monster roster
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (species, stand, attack, hit, die, walk) in [
            ("coffeemachine", 900.0, 780.0, 360.0, 960.0, 720.0),
            ("goblin", 600.0, 660.0, 300.0, 840.0, 600.0),
            ("goblinking", 1200.0, 960.0, 420.0, 1260.0, 840.0),
            ("rockspirit", 1100.0, 900.0, 480.0, 1140.0, 900.0),
            ("ultragray", 800.0, 720.0, 330.0, 900.0, 660.0),
            ("wyvern", 750.0, 840.0, 360.0, 1080.0, 600.0),
            ("zombie", 1000.0, 880.0, 400.0, 1200.0, 960.0),
        ] {
            table.set(species, "stand", stand);
            table.set(species, "attack1", attack);
            table.set(species, "hit1", hit);
            table.set(species, "die1", die);
            table.set(species, "move", walk);
        }
        table
    }
}

/// One slot in a formation: where a monster stops (`x`) and its vertical
/// placement (`y`), both in percent of stage size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub pos: Vec2,
}

impl FormationSlot {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }
}

/// Spawn-count-keyed monster placements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormationTable {
    formations: HashMap<u32, Vec<FormationSlot>>,
}

impl FormationTable {
    /// Slots for the given spawn count. Falls back to the 1-monster
    /// formation, and to a single centered slot if even that is missing.
    pub fn get(&self, count: u32) -> Vec<FormationSlot> {
        self.formations
            .get(&count)
            .or_else(|| self.formations.get(&1))
            .cloned()
            .unwrap_or_else(|| vec![FormationSlot::new(70.0, 62.0)])
    }

    /// Replace the slots for one spawn count
    pub fn set(&mut self, count: u32, slots: Vec<FormationSlot>) {
        self.formations.insert(count, slots);
    }

    /// Built-in formations for 1-5 monsters, staggered so sprites do not
    /// overlap
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.set(1, vec![FormationSlot::new(70.0, 62.0)]);
        table.set(
            2,
            vec![FormationSlot::new(66.0, 58.0), FormationSlot::new(74.0, 66.0)],
        );
        table.set(
            3,
            vec![
                FormationSlot::new(64.0, 54.0),
                FormationSlot::new(72.0, 62.0),
                FormationSlot::new(67.0, 70.0),
            ],
        );
        table.set(
            4,
            vec![
                FormationSlot::new(63.0, 52.0),
                FormationSlot::new(71.0, 58.0),
                FormationSlot::new(66.0, 64.0),
                FormationSlot::new(74.0, 70.0),
            ],
        );
        table.set(
            5,
            vec![
                FormationSlot::new(62.0, 50.0),
                FormationSlot::new(70.0, 56.0),
                FormationSlot::new(65.0, 62.0),
                FormationSlot::new(73.0, 68.0),
                FormationSlot::new(68.0, 74.0),
            ],
        );
        table
    }
}

/// Species definition: unscaled stats plus the attack-charge threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesDef {
    /// Base stats before wave scaling
    pub stats: EntityStats,
    /// Completed stand loops required before this species attacks
    pub charge_cycles: u32,
    /// Sprite alignment nudge passed through to the renderer
    #[serde(default)]
    pub anim_offset: Vec2,
}

impl Default for SpeciesDef {
    fn default() -> Self {
        Self {
            stats: EntityStats::default(),
            charge_cycles: 1,
            anim_offset: Vec2::ZERO,
        }
    }
}

/// Species-keyed base stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseStatsTable {
    species: HashMap<String, SpeciesDef>,
}

impl BaseStatsTable {
    /// Definition for a species; a default monster when unknown
    pub fn get(&self, species: &str) -> SpeciesDef {
        self.species.get(species).cloned().unwrap_or_default()
    }

    /// Register or replace a species definition
    pub fn set(&mut self, species: &str, def: SpeciesDef) {
        self.species.insert(species.to_string(), def);
    }

    /// Species names in a stable order (for random wave picks)
    pub fn species_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.species.keys().cloned().collect();
        names.sort();
        names
    }

    /// Built-in roster
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (name, hp, atk, def, charge, move_speed, scale) in [
            ("coffeemachine", 90, 9, 4, 2, 9.0, 1.0),
            ("goblin", 70, 8, 3, 1, 14.0, 0.9),
            ("goblinking", 220, 16, 9, 3, 7.0, 1.4),
            ("rockspirit", 160, 11, 12, 3, 6.0, 1.2),
            ("ultragray", 100, 13, 5, 2, 11.0, 1.0),
            ("wyvern", 120, 15, 6, 2, 12.0, 1.1),
            ("zombie", 140, 10, 7, 2, 5.0, 1.0),
        ] {
            table.set(
                name,
                SpeciesDef {
                    stats: EntityStats {
                        max_hp: hp,
                        hp,
                        atk,
                        def,
                        move_speed,
                        scale,
                        ..Default::default()
                    },
                    charge_cycles: charge,
                    anim_offset: Vec2::ZERO,
                },
            );
        }
        table
    }
}

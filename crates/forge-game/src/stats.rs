//! Combat stats shared by the hero and monsters

use serde::{Deserialize, Serialize};

/// Combat-relevant attributes.
///
/// HP, attack, and defense are integers; every HP mutation clamps to the
/// `0..=max_hp` range at the mutation site, so `hp` can never go negative
/// or exceed its maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStats {
    /// Maximum health points
    pub max_hp: u32,
    /// Current health points
    pub hp: u32,
    /// Attack power
    pub atk: u32,
    /// Defense; feeds the diminishing-returns mitigation curve
    pub def: u32,
    /// Critical hit chance (0.0 - 1.0)
    pub crit_rate: f32,
    /// Critical hit damage multiplier (>= 1.0)
    pub crit_dmg: f32,
    /// Horizontal speed in percent of stage width per second.
    /// Only used while walking into formation.
    pub move_speed: f32,
    /// Visual scale factor, no gameplay effect
    pub scale: f32,
}

impl Default for EntityStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            hp: 100,
            atk: 10,
            def: 5,
            crit_rate: 0.05,
            crit_dmg: 1.5,
            move_speed: 10.0,
            scale: 1.0,
        }
    }
}

impl EntityStats {
    /// Create new stats with full HP
    pub fn new(max_hp: u32, atk: u32, def: u32) -> Self {
        Self {
            max_hp,
            hp: max_hp,
            atk,
            def,
            ..Default::default()
        }
    }

    /// HP as a 0.0-1.0 fraction
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Whether this entity is alive
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage, clamping at zero. Returns the HP actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Add HP, clamping at `max_hp`. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Scale base stats for the given wave number: HP grows by 20% per
    /// wave, attack and defense by 10% per wave, floored to integers.
    pub fn scaled_for_wave(&self, wave: u32) -> Self {
        let hp_factor = 1.0 + wave as f64 * 0.2;
        let power_factor = 1.0 + wave as f64 * 0.1;
        let max_hp = (self.max_hp as f64 * hp_factor).floor() as u32;
        Self {
            max_hp,
            hp: max_hp,
            atk: (self.atk as f64 * power_factor).floor() as u32,
            def: (self.def as f64 * power_factor).floor() as u32,
            crit_rate: self.crit_rate,
            crit_dmg: self.crit_dmg,
            move_speed: self.move_speed,
            scale: self.scale,
        }
    }
}

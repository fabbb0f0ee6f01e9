//! Damage formula and floating damage numbers
//!
//! The formula is shared by the hero, monsters, and skill bursts:
//! `raw = atk * 100 / (100 + def)` — a diminishing-returns curve where
//! 100 defense halves incoming damage — then a uniform variance factor in
//! [0.95, 1.05], an independent crit roll, and a ceil to whole points.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lower bound of the per-hit variance factor
pub const VARIANCE_MIN: f32 = 0.95;
/// Upper bound of the per-hit variance factor
pub const VARIANCE_MAX: f32 = 1.05;

/// How long a floating damage number stays visible
pub const DAMAGE_NUMBER_LIFETIME_MS: f64 = 1200.0;

/// One resolved hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Whole damage points subtracted from the defender's HP
    pub amount: u32,
    /// Whether the crit roll landed
    pub is_crit: bool,
}

/// Resolve a hit with explicit variance and crit rolls.
///
/// Split out from the rng sampling so tests can force variance to 1.0 and
/// disable the crit.
pub fn resolve_damage(
    atk: u32,
    crit_rate: f32,
    crit_dmg: f32,
    def: u32,
    variance: f32,
    crit_roll: f32,
) -> DamageEvent {
    let raw = atk as f32 * (100.0 / (100.0 + def as f32));
    let mut amount = raw * variance;
    let is_crit = crit_roll < crit_rate;
    if is_crit {
        amount *= crit_dmg;
    }
    DamageEvent {
        amount: amount.ceil().max(0.0) as u32,
        is_crit,
    }
}

/// Resolve a hit, sampling variance and the crit roll from `rng`
pub fn roll_damage(
    atk: u32,
    crit_rate: f32,
    crit_dmg: f32,
    def: u32,
    rng: &mut impl Rng,
) -> DamageEvent {
    let variance = rng.gen_range(VARIANCE_MIN..=VARIANCE_MAX);
    let crit_roll = rng.gen::<f32>();
    resolve_damage(atk, crit_rate, crit_dmg, def, variance, crit_roll)
}

/// A floating damage number over a monster.
///
/// Pure presentation, but the amount and crit flag are copied from the
/// exact [`DamageEvent`] that was subtracted from HP — the display never
/// re-rolls.
#[derive(Debug, Clone)]
pub struct DamageNumber {
    pub id: Uuid,
    pub amount: u32,
    pub is_crit: bool,
    /// Stage position in percent
    pub pos: Vec2,
    pub spawned_ms: f64,
}

/// Live floating damage numbers
#[derive(Debug, Clone, Default)]
pub struct DamageNumbers {
    numbers: Vec<DamageNumber>,
}

impl DamageNumbers {
    /// Add a number for a resolved hit
    pub fn push(&mut self, event: DamageEvent, pos: Vec2, now_ms: f64) {
        self.numbers.push(DamageNumber {
            id: Uuid::new_v4(),
            amount: event.amount,
            is_crit: event.is_crit,
            pos,
            spawned_ms: now_ms,
        });
    }

    /// Drop numbers older than [`DAMAGE_NUMBER_LIFETIME_MS`]
    pub fn update(&mut self, now_ms: f64) {
        self.numbers
            .retain(|n| now_ms - n.spawned_ms < DAMAGE_NUMBER_LIFETIME_MS);
    }

    /// Currently visible numbers
    pub fn iter(&self) -> impl Iterator<Item = &DamageNumber> {
        self.numbers.iter()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_formula_deterministic() {
        // 300 atk vs 50 def: 300 * 100/150 = 200 exactly
        let event = resolve_damage(300, 0.0, 2.0, 50, 1.0, 1.0);
        assert_eq!(event.amount, 200);
        assert!(!event.is_crit);
    }

    #[test]
    fn test_hundred_defense_halves() {
        let event = resolve_damage(100, 0.0, 2.0, 100, 1.0, 1.0);
        assert_eq!(event.amount, 50);
    }

    #[test]
    fn test_crit_multiplies() {
        let event = resolve_damage(300, 1.0, 2.0, 50, 1.0, 0.0);
        assert!(event.is_crit);
        assert_eq!(event.amount, 400);
    }

    #[test]
    fn test_damage_rounds_up() {
        // 10 * 100/103 = 9.70... -> 10
        let event = resolve_damage(10, 0.0, 2.0, 3, 1.0, 1.0);
        assert_eq!(event.amount, 10);
    }

    #[test]
    fn test_rolled_damage_within_variance() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let event = roll_damage(300, 0.0, 2.0, 50, &mut rng);
            assert!(event.amount >= 190 && event.amount <= 210, "amount={}", event.amount);
        }
    }

    #[test]
    fn test_damage_numbers_expire() {
        let mut numbers = DamageNumbers::default();
        let event = DamageEvent { amount: 42, is_crit: false };
        numbers.push(event, Vec2::new(50.0, 50.0), 0.0);
        numbers.update(1199.0);
        assert_eq!(numbers.len(), 1);
        numbers.update(1200.0);
        assert!(numbers.is_empty());
    }
}

//! The player's hero
//!
//! The hero's sprite action runs on its own timer, independent of the
//! monster animation-cycle machine: an action auto-reverts to the idle
//! loop after a fixed per-action duration. Combat timing (the auto-attack
//! cooldown) lives in the resolver, not here.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::stats::EntityStats;

/// Idle sprite action the hero reverts to
pub const HERO_IDLE_ACTION: &str = "stand1";

/// Attack sprite animations the hero picks from at random
pub const HERO_ATTACK_ANIMATIONS: &[&str] = &[
    "shoot1", "shoot2", "shootF",
    "stabO1", "stabO2", "stabOF",
    "stabT1", "stabT2", "stabTF",
    "swingO1", "swingO2", "swingO3", "swingOF",
    "swingP1", "swingP2", "swingPF",
    "swingT1", "swingT2", "swingT3", "swingTF",
];

/// Fixed display duration of each hero sprite action, in milliseconds
pub fn hero_action_duration_ms(action: &str) -> f64 {
    match action {
        "alert" => 1500.0,
        "heal" => 800.0,
        "jump" => 100.0,
        "shoot1" => 800.0,
        "shoot2" => 820.0,
        "shootF" => 700.0,
        "stabO1" | "stabO2" => 800.0,
        "stabOF" => 700.0,
        "stabT1" | "stabT2" => 750.0,
        "stabTF" => 700.0,
        "stand1" | "stand2" => 1500.0,
        "swingO1" | "swingO2" | "swingO3" => 800.0,
        "swingOF" => 700.0,
        "swingP1" | "swingP2" => 800.0,
        "swingPF" => 700.0,
        "swingT1" | "swingT2" | "swingT3" => 800.0,
        "swingTF" => 700.0,
        "walk1" | "walk2" => 720.0,
        _ => 1000.0,
    }
}

/// The hero singleton
#[derive(Debug, Clone)]
pub struct Hero {
    pub stats: EntityStats,
    /// Auto-attacks per second; the cooldown divisor
    pub attacks_per_second: f32,
    /// Current sprite action
    pub character_action: String,
    /// When the current sprite action started
    pub action_start_ms: f64,
    /// Changes whenever the action is (re)triggered, so the renderer
    /// restarts sprite playback even for a repeat of the same action
    pub action_instance: Uuid,
}

impl Hero {
    pub fn new(stats: EntityStats, attacks_per_second: f32) -> Self {
        Self {
            stats,
            attacks_per_second: attacks_per_second.max(0.1),
            character_action: HERO_IDLE_ACTION.to_string(),
            action_start_ms: 0.0,
            action_instance: Uuid::new_v4(),
        }
    }

    /// Auto-attack cooldown in milliseconds
    pub fn attack_cooldown_ms(&self) -> f64 {
        1000.0 / self.attacks_per_second as f64
    }

    /// Whether the hero is alive
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Switch the sprite action and restart its timer
    pub fn set_action(&mut self, action: &str, now_ms: f64) {
        self.character_action = action.to_string();
        self.action_start_ms = now_ms;
        self.action_instance = Uuid::new_v4();
    }

    /// Play a random attack animation
    pub fn play_attack_animation(&mut self, rng: &mut impl Rng, now_ms: f64) {
        let action = HERO_ATTACK_ANIMATIONS
            .choose(rng)
            .copied()
            .unwrap_or(HERO_IDLE_ACTION);
        self.set_action(action, now_ms);
    }

    /// Revert to idle once the current action's fixed duration elapses
    pub fn update(&mut self, now_ms: f64) {
        if self.character_action == HERO_IDLE_ACTION {
            return;
        }
        let duration = hero_action_duration_ms(&self.character_action);
        if now_ms - self.action_start_ms >= duration {
            self.set_action(HERO_IDLE_ACTION, now_ms);
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new(
            EntityStats {
                max_hp: 1000,
                hp: 1000,
                atk: 50,
                def: 20,
                crit_rate: 0.15,
                crit_dmg: 1.8,
                ..Default::default()
            },
            1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cooldown_from_attack_rate() {
        let hero = Hero::new(EntityStats::default(), 2.0);
        assert_eq!(hero.attack_cooldown_ms(), 500.0);
    }

    #[test]
    fn test_action_auto_reverts() {
        let mut hero = Hero::default();
        let mut rng = StdRng::seed_from_u64(1);
        hero.play_attack_animation(&mut rng, 0.0);
        assert_ne!(hero.character_action, HERO_IDLE_ACTION);

        let duration = hero_action_duration_ms(&hero.character_action);
        hero.update(duration - 1.0);
        assert_ne!(hero.character_action, HERO_IDLE_ACTION);
        hero.update(duration);
        assert_eq!(hero.character_action, HERO_IDLE_ACTION);
    }

    #[test]
    fn test_instance_changes_on_retrigger() {
        let mut hero = Hero::default();
        let first = hero.action_instance;
        hero.set_action("shoot1", 0.0);
        let second = hero.action_instance;
        hero.set_action("shoot1", 10.0);
        assert_ne!(first, second);
        assert_ne!(second, hero.action_instance);
    }

    #[test]
    fn test_unknown_action_duration_defaults() {
        assert_eq!(hero_action_duration_ms("nosuchaction"), 1000.0);
    }
}

//! Monster combat entity

use forge_core::MonsterId;
use glam::Vec2;

use crate::action::Action;
use crate::stats::EntityStats;
use crate::tables::{FormationSlot, SpeciesDef};

/// A live monster in the current wave
#[derive(Debug, Clone)]
pub struct Monster {
    pub id: MonsterId,
    /// Species key: indexes the duration table and visual assets
    pub species: String,
    /// Current horizontal position, percent of stage width
    pub x: f32,
    /// Stopping point for the walking stage
    pub target_x: f32,
    /// Vertical placement from the formation slot, percent
    pub y: f32,
    pub stats: EntityStats,
    /// Completed stand loops required before attacking
    pub charge_cycles: u32,
    /// Sprite alignment nudge for the renderer
    pub anim_offset: Vec2,
    /// Current action; [`Action::Die`] is terminal
    pub action: Action,
    /// When the current action began
    pub state_start_ms: f64,
    /// Completed stand loops since the last attack or hit interruption
    pub stand_cycles: u32,
    /// Timestamp of the most recent hit absorbed mid-attack, to splice in
    /// the hit reaction once the attack animation completes
    pub last_hit_ms: Option<f64>,
}

impl Monster {
    /// Create a monster at an off-screen start position converging on its
    /// formation slot
    pub fn spawn(
        id: MonsterId,
        species: &str,
        def: &SpeciesDef,
        start_x: f32,
        slot: FormationSlot,
        now_ms: f64,
    ) -> Self {
        Self {
            id,
            species: species.to_string(),
            x: start_x,
            target_x: slot.pos.x,
            y: slot.pos.y,
            stats: def.stats.clone(),
            charge_cycles: def.charge_cycles.max(1),
            anim_offset: def.anim_offset,
            action: Action::Move,
            state_start_ms: now_ms,
            stand_cycles: 0,
            last_hit_ms: None,
        }
    }

    /// Milliseconds the current action has been playing
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.state_start_ms).max(0.0)
    }

    /// Whether the death animation is playing
    pub fn is_dying(&self) -> bool {
        self.action.is_dying()
    }

    /// Valid as an attack target: alive and not already dying
    pub fn is_targetable(&self) -> bool {
        self.stats.is_alive() && !self.is_dying()
    }

    /// Switch to a new action, resetting the elapsed-time baseline.
    ///
    /// Returns false (and does nothing) if the death animation is already
    /// playing: `die1` is never overwritten.
    pub fn set_action(&mut self, action: Action, now_ms: f64) -> bool {
        if self.is_dying() {
            return false;
        }
        self.action = action;
        self.state_start_ms = now_ms;
        true
    }

    /// Restart the current action's timer without changing the action
    pub fn restart_action(&mut self, now_ms: f64) {
        self.state_start_ms = now_ms;
    }

    /// Enter the death animation, interrupting anything except an
    /// already-playing death
    pub fn force_die(&mut self, now_ms: f64) {
        if !self.is_dying() {
            self.action = Action::Die;
            self.state_start_ms = now_ms;
            self.last_hit_ms = None;
        }
    }

    /// Whether the walking stage is done for this monster
    pub fn at_target(&self) -> bool {
        self.x <= self.target_x
    }

    /// Advance toward the stop point, clamped so it cannot overshoot
    pub fn step_toward_target(&mut self, delta_secs: f32) {
        if self.at_target() {
            return;
        }
        self.x = (self.x - self.stats.move_speed * delta_secs).max(self.target_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::FormationSlot;

    fn goblin(now: f64) -> Monster {
        let def = SpeciesDef::default();
        Monster::spawn(
            MonsterId(1),
            "goblin",
            &def,
            110.0,
            FormationSlot::new(70.0, 62.0),
            now,
        )
    }

    #[test]
    fn test_spawn_starts_walking() {
        let m = goblin(0.0);
        assert_eq!(m.action, Action::Move);
        assert_eq!(m.target_x, 70.0);
        assert_eq!(m.y, 62.0);
        assert!(!m.at_target());
    }

    #[test]
    fn test_step_clamps_at_target() {
        let mut m = goblin(0.0);
        m.stats.move_speed = 10.0;
        // 110 -> 70 is 40 percent; 100 seconds would overshoot massively
        m.step_toward_target(100.0);
        assert_eq!(m.x, 70.0);
        assert!(m.at_target());
    }

    #[test]
    fn test_set_action_resets_baseline() {
        let mut m = goblin(0.0);
        assert!(m.set_action(Action::Stand, 500.0));
        assert_eq!(m.state_start_ms, 500.0);
        assert_eq!(m.elapsed_ms(900.0), 400.0);
    }

    #[test]
    fn test_die_is_terminal() {
        let mut m = goblin(0.0);
        m.force_die(100.0);
        assert!(m.is_dying());
        assert!(!m.set_action(Action::Stand, 200.0));
        assert!(m.is_dying());
        // A second force keeps the original timer
        m.force_die(300.0);
        assert_eq!(m.state_start_ms, 100.0);
    }

    #[test]
    fn test_targetable_guards() {
        let mut m = goblin(0.0);
        assert!(m.is_targetable());
        m.stats.apply_damage(m.stats.hp);
        assert!(!m.is_targetable());
    }
}

//! Entity action states
//!
//! Every combat entity is always in exactly one action. An action maps to
//! one sprite animation; the numeric variant on attacks and hit reactions
//! picks between alternate sprites for species that define more than one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a monster is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walking toward the formation stop point
    Move,
    /// Idle loop; completed loops charge the next attack
    Stand,
    /// Attack animation (variant picks the sprite)
    Attack(u8),
    /// Hit reaction (variant picks the sprite)
    Hit(u8),
    /// Death animation. Terminal: nothing overwrites it.
    Die,
}

impl Action {
    /// Whether this is any attack variant
    pub fn is_attack(&self) -> bool {
        matches!(self, Action::Attack(_))
    }

    /// Whether this is any hit-reaction variant
    pub fn is_hit(&self) -> bool {
        matches!(self, Action::Hit(_))
    }

    /// Whether the death animation is playing
    pub fn is_dying(&self) -> bool {
        matches!(self, Action::Die)
    }

    /// Animation key for the duration table and the renderer,
    /// e.g. `"stand"`, `"attack1"`, `"hit2"`, `"die1"`.
    pub fn key(&self) -> String {
        match self {
            Action::Move => "move".to_string(),
            Action::Stand => "stand".to_string(),
            Action::Attack(n) => format!("attack{}", n),
            Action::Hit(n) => format!("hit{}", n),
            Action::Die => "die1".to_string(),
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Stand
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_keys() {
        assert_eq!(Action::Stand.key(), "stand");
        assert_eq!(Action::Move.key(), "move");
        assert_eq!(Action::Attack(1).key(), "attack1");
        assert_eq!(Action::Hit(2).key(), "hit2");
        assert_eq!(Action::Die.key(), "die1");
    }

    #[test]
    fn test_action_categories() {
        assert!(Action::Attack(3).is_attack());
        assert!(Action::Hit(1).is_hit());
        assert!(Action::Die.is_dying());
        assert!(!Action::Stand.is_attack());
    }
}

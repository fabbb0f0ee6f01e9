//! Core identifier types

use serde::{Deserialize, Serialize};

/// Unique identifier for a monster instance.
///
/// Ids are allocated monotonically by the simulation and never reused
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u64);

impl std::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "monster#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monster_id_ordering() {
        assert!(MonsterId(1) < MonsterId(2));
        assert_eq!(format!("{}", MonsterId(7)), "monster#7");
    }
}

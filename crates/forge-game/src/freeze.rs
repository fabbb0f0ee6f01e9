//! Freeze coordinator
//!
//! Combat suspends gracefully while the UI is in a non-combat view: walking
//! monsters snap to stand, stand loops stop charging attacks, and the
//! hero's auto-attack is suppressed — but in-flight attack, hit, and death
//! animations are allowed to finish naturally. The core only reads these
//! flags; the UI layer owns them.

use serde::{Deserialize, Serialize};

/// UI state flags the combat core consumes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UiFlags {
    /// Camera capture view is open
    pub camera_active: bool,
    /// An async classification request is outstanding
    pub analyzing: bool,
    /// The scan results overlay is showing
    pub result_showing: bool,
    /// Pause menu is open
    pub menu_open: bool,
    /// An ultimate-skill cutscene is playing
    pub skill_cutscene_active: bool,
}

impl UiFlags {
    /// Whether combat progression is suspended this tick
    pub fn is_frozen(&self) -> bool {
        self.camera_active
            || self.analyzing
            || self.result_showing
            || self.menu_open
            || self.skill_cutscene_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_frozen_by_default() {
        assert!(!UiFlags::default().is_frozen());
    }

    #[test]
    fn test_any_flag_freezes() {
        for i in 0..5 {
            let mut flags = UiFlags::default();
            match i {
                0 => flags.camera_active = true,
                1 => flags.analyzing = true,
                2 => flags.result_showing = true,
                3 => flags.menu_open = true,
                _ => flags.skill_cutscene_active = true,
            }
            assert!(flags.is_frozen());
        }
    }
}

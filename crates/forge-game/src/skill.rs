//! Ultimate skill catalog
//!
//! Skills are unlocked by scanning real-world objects (the integration
//! layer's concern). The combat core only needs each skill's visual
//! duration: the AOE damage burst lands once the cutscene has played out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Visual duration assumed for a skill missing from the table
pub const DEFAULT_SKILL_DURATION_MS: f64 = 3000.0;

/// Skill-name-keyed visual durations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillTable {
    durations: HashMap<String, f64>,
}

impl SkillTable {
    /// Visual duration of a skill; defaults when unknown
    pub fn duration_ms(&self, skill: &str) -> f64 {
        self.durations
            .get(skill)
            .copied()
            .unwrap_or(DEFAULT_SKILL_DURATION_MS)
    }

    pub fn set(&mut self, skill: &str, duration_ms: f64) {
        self.durations.insert(skill.to_string(), duration_ms);
    }

    /// Built-in ultimate skill roster
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (name, duration) in [
            ("astralblitz", 7140.0),
            ("durandal", 5760.0),
            ("groundzero", 5460.0),
            ("shadower", 5100.0),
            ("supercannonexplosion", 6540.0),
            ("ren", 3480.0),
            ("cataclysm", 4590.0),
            ("spiritcalibur", 7020.0),
            ("souleclipse", 8340.0),
            ("combodefault", 4400.0),
        ] {
            table.set(name, duration);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_durations() {
        let table = SkillTable::builtin();
        assert_eq!(table.duration_ms("durandal"), 5760.0);
        assert_eq!(table.duration_ms("nosuchskill"), DEFAULT_SKILL_DURATION_MS);
    }
}

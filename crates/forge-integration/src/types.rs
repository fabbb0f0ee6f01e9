use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Stat keys eligible as fallback when a scan response carries no valid
/// `affected_stats` list
pub const FALLBACK_STAT_POOL: &[&str] = &[
    "hp", "atk", "def", "crit_rate", "crit_dmg", "move_speed",
];

/// What the user asked the scanner to do with the captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    Craft,
    ScanSkill,
}

impl ScanMode {
    /// Wire value for the `mode` form field
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Craft => "craft",
            ScanMode::ScanSkill => "scan-skill",
        }
    }
}

/// Item stats assigned by the vision model
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ItemStats {
    #[serde(default)]
    pub atk: u32,
    #[serde(default)]
    pub def: u32,
    #[serde(default)]
    pub hp: u32,
}

/// The vision model's analysis of the captured image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanAnalysis {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub attribute: String,
    /// `"weapon"`, `"armor"` or `"skill"`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub rarity: f32,
    #[serde(default)]
    pub stats: ItemStats,
    /// Stat keys the scanned item boosts; may be missing or empty
    #[serde(default)]
    pub affected_stats: Option<Vec<String>>,
}

impl ScanAnalysis {
    /// The affected stat keys, falling back to three random picks from the
    /// fixed pool when the response lacks a usable list
    pub fn affected_stats_or_fallback(&self, rng: &mut impl Rng) -> Vec<String> {
        if let Some(stats) = &self.affected_stats {
            if !stats.is_empty() {
                return stats.clone();
            }
        }
        warn!(item = %self.item, "scan response missing affected_stats, using fallback");
        FALLBACK_STAT_POOL
            .choose_multiple(rng, 3)
            .map(|s| s.to_string())
            .collect()
    }
}

/// Generated name and description for the scanned item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flavor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The flavor field sometimes arrives as a JSON string, possibly wrapped
/// in a markdown code fence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlavorWire {
    Object(Flavor),
    Text(String),
}

impl FlavorWire {
    /// Normalize to a `Flavor`, parsing fenced JSON strings and falling
    /// back to the raw text as the description
    pub fn normalize(self, default_name: &str) -> Flavor {
        match self {
            FlavorWire::Object(flavor) => flavor,
            FlavorWire::Text(text) => {
                let raw = text
                    .trim()
                    .trim_start_matches("```json")
                    .trim_start_matches("```")
                    .trim_end_matches("```")
                    .trim();
                match serde_json::from_str::<Flavor>(raw) {
                    Ok(flavor) => flavor,
                    Err(_) => Flavor {
                        name: default_name.to_string(),
                        description: text,
                    },
                }
            }
        }
    }
}

/// Full `/scan` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponseWire {
    pub analysis: ScanAnalysis,
    pub flavor: FlavorWire,
}

/// Normalized scan result handed to the game layer
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub analysis: ScanAnalysis,
    pub flavor: Flavor,
}

impl From<ScanResponseWire> for ScanResult {
    fn from(wire: ScanResponseWire) -> Self {
        let flavor = wire.flavor.normalize(&wire.analysis.item);
        Self {
            analysis: wire.analysis,
            flavor,
        }
    }
}

impl ScanResult {
    /// Skill name to trigger when the scan classified a skill item
    pub fn skill_name(&self) -> Option<&str> {
        if self.analysis.kind == "skill" {
            Some(&self.flavor.name)
        } else {
            None
        }
    }
}

//! Game settings with persistence
//!
//! Settings are saved to `~/.config/forgeworld/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default)]
    pub hero: HeroSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub backend: BackendSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("forgeworld"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Hero build overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    /// Probability of a critical hit (0.0 to 1.0)
    pub crit_rate: f32,
    /// Damage multiplier on a critical hit
    pub crit_dmg: f32,
    /// Auto-attacks per second
    pub attacks_per_second: f32,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            max_hp: 1000,
            atk: 50,
            def: 20,
            crit_rate: 0.15,
            crit_dmg: 1.8,
            attacks_per_second: 1.0,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Rng seed; 0 picks a random seed at startup
    pub seed: u64,
    /// Time scale multiplier (affects gameplay speed)
    pub time_scale: f64,
    /// Maximum per-frame delta in milliseconds
    pub max_delta_ms: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            time_scale: 1.0,
            max_delta_ms: 250.0,
        }
    }
}

/// Scan backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the classification backend
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip_toml() {
        let settings = GameSettings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: GameSettings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.hero.atk, settings.hero.atk);
        assert_eq!(parsed.backend.base_url, settings.backend.base_url);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        // Missing sections fall back to defaults rather than failing
        let parsed: GameSettings = toml::from_str("[hero]\natk = 99\n").unwrap();
        assert_eq!(parsed.hero.atk, 99);
        assert_eq!(parsed.simulation.time_scale, 1.0);
    }
}

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_swing_lookback() -> usize {
    3
}

fn default_proximity_percent() -> f64 {
    0.006
}

fn default_max_levels_per_side() -> usize {
    4
}

fn default_use_volume_confirmation() -> bool {
    true
}

/// Tuning knobs for one level computation. Every field is optional in config
/// files; unset fields resolve to these defaults and the resolved settings are
/// echoed back in the result for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Window radius for swing detection: a pivot must beat every candle
    /// within this many bars on both sides.
    #[serde(default = "default_swing_lookback")]
    pub swing_lookback: usize,
    /// Fractional price distance treated as "the same level".
    #[serde(default = "default_proximity_percent")]
    pub proximity_percent: f64,
    #[serde(default = "default_max_levels_per_side")]
    pub max_levels_per_side: usize,
    /// When true, pivot weight scales with volume relative to the series
    /// average; when false every pivot weighs 1.
    #[serde(default = "default_use_volume_confirmation")]
    pub use_volume_confirmation: bool,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            swing_lookback: default_swing_lookback(),
            proximity_percent: default_proximity_percent(),
            max_levels_per_side: default_max_levels_per_side(),
            use_volume_confirmation: default_use_volume_confirmation(),
        }
    }
}

impl LevelSettings {
    /// Range checks live here at the boundary; the engine itself assumes
    /// validated settings.
    pub fn validate(&self) -> Result<()> {
        if self.swing_lookback == 0 {
            bail!("swing_lookback must be >= 1");
        }
        if !(self.proximity_percent > 0.0) || !self.proximity_percent.is_finite() {
            bail!(
                "proximity_percent must be a positive finite fraction, got {}",
                self.proximity_percent
            );
        }
        if self.max_levels_per_side == 0 {
            bail!("max_levels_per_side must be >= 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: LevelSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load `config/default.toml` if present, otherwise fall back to defaults.
    /// All engine fields are optional in the file.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config/default.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let config_str = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<Config>(&config_str)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Config::default()
        };

        config.engine.validate().context("invalid engine settings")?;
        Ok(config)
    }
}

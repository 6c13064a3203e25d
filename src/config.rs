// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_watering_frequency() -> u32 {
    7
}
fn default_attention_limit() -> usize {
    3
}
fn default_activity_limit() -> usize {
    4
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Watering interval assumed when a new plant doesn't specify one.
    #[serde(default = "default_watering_frequency")]
    pub default_watering_frequency_days: u32,

    /// How many entries the "needs attention" listing shows.
    #[serde(default = "default_attention_limit")]
    pub attention_limit: usize,

    /// How many recent care events the dashboard shows.
    #[serde(default = "default_activity_limit")]
    pub recent_activity_limit: usize,

    #[serde(default)]
    pub show_completed_tasks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            default_watering_frequency_days: 7,
            attention_limit: 3,
            recent_activity_limit: 4,
            show_completed_tasks: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration, treating a missing file as defaults.
    /// Malformed or invalid files still fail so a typo never degrades
    /// into silently different behavior.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(ctx)
    }

    fn validate(&self) -> Result<()> {
        if self.default_watering_frequency_days < 1 {
            return Err(anyhow::anyhow!(
                "default_watering_frequency_days must be at least 1"
            ));
        }
        Ok(())
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

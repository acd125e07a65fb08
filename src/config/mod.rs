//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Chart-layout constants for label collision resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal fan-out unit in pixels
    #[serde(default = "default_base_unit")]
    pub base_unit: f64,

    /// Vertical step per colliding label in pixels
    #[serde(default = "default_vertical_step")]
    pub vertical_step: f64,

    /// Decimal places used when grouping nearby plot coordinates
    #[serde(default = "default_coordinate_precision")]
    pub coordinate_precision: u32,
}

fn default_base_unit() -> f64 {
    5.0
}

fn default_vertical_step() -> f64 {
    3.0
}

fn default_coordinate_precision() -> u32 {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_unit: default_base_unit(),
            vertical_step: default_vertical_step(),
            coordinate_precision: default_coordinate_precision(),
        }
    }
}

/// Narrative generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Text shown when generation fails or times out
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_fallback() -> String {
    "Unable to generate a description at this time.".to_string()
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            fallback: default_fallback(),
        }
    }
}

/// Main engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub narrative: NarrativeConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            layout: LayoutConfig::default(),
            narrative: NarrativeConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.base_unit <= 0.0 {
            return Err(ConfigError::ValidationError(
                "layout base_unit must be greater than 0".to_string(),
            ));
        }

        if self.layout.coordinate_precision > 6 {
            return Err(ConfigError::ValidationError(
                "layout coordinate_precision must be at most 6".to_string(),
            ));
        }

        if self.narrative.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "narrative timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

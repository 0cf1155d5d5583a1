use crate::adjacency::DEFAULT_PROXIMITY_THRESHOLD;
use crate::error::{Result, SeatplanError};
use crate::solver::{SolveOptions, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for seat assignment
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub proximity_threshold: ConfigValue<f64>,
    pub fill_from_front: ConfigValue<bool>,
    pub alternate_gender: ConfigValue<bool>,
    /// Maximum candidate placements per solve, 0 for unlimited
    pub search_limit: ConfigValue<u64>,
    pub seed: ConfigValue<Option<u64>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            proximity_threshold: ConfigValue::new(
                DEFAULT_PROXIMITY_THRESHOLD,
                ConfigSource::Default,
            ),
            fill_from_front: ConfigValue::new(false, ConfigSource::Default),
            alternate_gender: ConfigValue::new(false, ConfigSource::Default),
            search_limit: ConfigValue::new(DEFAULT_SEARCH_LIMIT, ConfigSource::Default),
            seed: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| SeatplanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| SeatplanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(threshold) = file_config.proximity_threshold {
            validate_threshold(threshold)?;
            self.proximity_threshold.update(threshold, ConfigSource::File);
        }

        if let Some(fill_from_front) = file_config.fill_from_front {
            self.fill_from_front.update(fill_from_front, ConfigSource::File);
        }

        if let Some(alternate_gender) = file_config.alternate_gender {
            self.alternate_gender.update(alternate_gender, ConfigSource::File);
        }

        if let Some(search_limit) = file_config.search_limit {
            self.search_limit.update(search_limit, ConfigSource::File);
        }

        if let Some(seed) = file_config.seed {
            self.seed.update(Some(seed), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // SEATPLAN_PROXIMITY_THRESHOLD
        if let Ok(value) = env::var("SEATPLAN_PROXIMITY_THRESHOLD") {
            match value.parse::<f64>() {
                Ok(threshold) if validate_threshold(threshold).is_ok() => {
                    self.proximity_threshold.update(threshold, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid SEATPLAN_PROXIMITY_THRESHOLD value '{}': expected a non-negative number",
                    value
                ),
            }
        }

        // SEATPLAN_FILL_FROM_FRONT
        if let Ok(value) = env::var("SEATPLAN_FILL_FROM_FRONT") {
            match parse_bool("fill_from_front", &value) {
                Ok(flag) => self.fill_from_front.update(flag, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SEATPLAN_FILL_FROM_FRONT value '{}': expected true or false",
                    value
                ),
            }
        }

        // SEATPLAN_ALTERNATE_GENDER
        if let Ok(value) = env::var("SEATPLAN_ALTERNATE_GENDER") {
            match parse_bool("alternate_gender", &value) {
                Ok(flag) => self.alternate_gender.update(flag, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SEATPLAN_ALTERNATE_GENDER value '{}': expected true or false",
                    value
                ),
            }
        }

        // SEATPLAN_SEARCH_LIMIT
        if let Ok(value) = env::var("SEATPLAN_SEARCH_LIMIT") {
            match value.parse::<u64>() {
                Ok(limit) => self.search_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid SEATPLAN_SEARCH_LIMIT value '{}': expected a non-negative integer",
                    value
                ),
            }
        }

        // SEATPLAN_SEED
        if let Ok(value) = env::var("SEATPLAN_SEED") {
            match value.parse::<u64>() {
                Ok(seed) => self.seed.update(Some(seed), ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid SEATPLAN_SEED value '{}': expected an integer", value)
                }
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(threshold) = overrides.proximity_threshold {
            self.proximity_threshold.update(threshold, ConfigSource::Cli);
        }

        if let Some(fill_from_front) = overrides.fill_from_front {
            self.fill_from_front.update(fill_from_front, ConfigSource::Cli);
        }

        if let Some(alternate_gender) = overrides.alternate_gender {
            self.alternate_gender.update(alternate_gender, ConfigSource::Cli);
        }

        if let Some(search_limit) = overrides.search_limit {
            self.search_limit.update(search_limit, ConfigSource::Cli);
        }

        if let Some(seed) = overrides.seed {
            self.seed.update(Some(seed), ConfigSource::Cli);
        }
    }

    /// Solver options for the resolved values
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            fill_from_front: self.fill_from_front.value,
            alternate_gender: self.alternate_gender.value,
            proximity_threshold: self.proximity_threshold.value,
            search_limit: Some(self.search_limit.value).filter(|limit| *limit > 0),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "proximity_threshold".to_string(),
            (self.proximity_threshold.value.to_string(), self.proximity_threshold.source),
        );

        map.insert(
            "fill_from_front".to_string(),
            (self.fill_from_front.value.to_string(), self.fill_from_front.source),
        );

        map.insert(
            "alternate_gender".to_string(),
            (self.alternate_gender.value.to_string(), self.alternate_gender.source),
        );

        let limit = match self.search_limit.value {
            0 => "unlimited".to_string(),
            n => n.to_string(),
        };
        map.insert("search_limit".to_string(), (limit, self.search_limit.source));

        let seed = self.seed.value.map_or_else(|| "random".to_string(), |s| s.to_string());
        map.insert("seed".to_string(), (seed, self.seed.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    proximity_threshold: Option<f64>,
    fill_from_front: Option<bool>,
    alternate_gender: Option<bool>,
    search_limit: Option<u64>,
    seed: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub proximity_threshold: Option<f64>,
    pub fill_from_front: Option<bool>,
    pub alternate_gender: Option<bool>,
    pub search_limit: Option<u64>,
    pub seed: Option<u64>,
}

/// Parse a boolean flag from string
pub fn parse_bool(key: &str, s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SeatplanError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid boolean: {}. Use true or false", s),
        }),
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(SeatplanError::ConfigInvalid {
            key: "proximity_threshold".to_string(),
            reason: format!("{} is not a non-negative distance", threshold),
        })
    }
}

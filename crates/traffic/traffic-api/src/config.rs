//! Traffic configuration types.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use traffic_core::TrafficManager;
use traffic_spi::TrafficError;

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] TrafficError),
}

// ============================================================================
// Intersection Configuration
// ============================================================================

/// Dimensions of one managed intersection, fixed for a manager's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Number of lanes modeled.
    pub num_lanes: usize,
    /// Observations kept in the rolling window.
    pub history_length: usize,
    /// Seconds in one signal cycle.
    pub cycle_length: f64,
}

impl TrafficConfig {
    pub fn new(num_lanes: usize, history_length: usize, cycle_length: f64) -> Self {
        Self {
            num_lanes,
            history_length,
            cycle_length,
        }
    }

    /// Default window and cycle for the given lane count.
    pub fn with_lanes(num_lanes: usize) -> Self {
        Self {
            num_lanes,
            ..Self::default()
        }
    }

    /// Reject non-positive dimensions.
    pub fn validate(&self) -> Result<(), TrafficError> {
        if self.num_lanes == 0 {
            return Err(TrafficError::invalid_config(
                "num_lanes",
                "must be at least 1",
            ));
        }
        if self.history_length == 0 {
            return Err(TrafficError::invalid_config(
                "history_length",
                "must be at least 1",
            ));
        }
        if !self.cycle_length.is_finite() || self.cycle_length <= 0.0 {
            return Err(TrafficError::invalid_config(
                "cycle_length",
                format!("must be a positive finite number of seconds, got {}", self.cycle_length),
            ));
        }
        Ok(())
    }

    /// Validate and build a manager with these dimensions.
    pub fn build_manager(&self) -> Result<TrafficManager, TrafficError> {
        self.validate()?;
        TrafficManager::new(self.num_lanes, self.history_length, self.cycle_length)
    }

    /// Parse and validate a JSON document; absent fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            num_lanes: 4,
            history_length: 10,
            cycle_length: 120.0,
        }
    }
}

/// Builder for TrafficConfig.
#[derive(Debug, Default)]
pub struct TrafficConfigBuilder {
    num_lanes: Option<usize>,
    history_length: Option<usize>,
    cycle_length: Option<f64>,
}

impl TrafficConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lane count.
    pub fn num_lanes(mut self, num_lanes: usize) -> Self {
        self.num_lanes = Some(num_lanes);
        self
    }

    /// Set the history window length.
    pub fn history_length(mut self, history_length: usize) -> Self {
        self.history_length = Some(history_length);
        self
    }

    /// Set the cycle length in seconds.
    pub fn cycle_length(mut self, cycle_length: f64) -> Self {
        self.cycle_length = Some(cycle_length);
        self
    }

    /// Build and validate; unset fields take their defaults.
    pub fn build(self) -> Result<TrafficConfig, TrafficError> {
        let defaults = TrafficConfig::default();
        let config = TrafficConfig {
            num_lanes: self.num_lanes.unwrap_or(defaults.num_lanes),
            history_length: self.history_length.unwrap_or(defaults.history_length),
            cycle_length: self.cycle_length.unwrap_or(defaults.cycle_length),
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Synthetic Stream Configuration
// ============================================================================

/// Shape of the synthetic demo stream.
///
/// Each lane gets a base count drawn once from `[base_min, base_max)`. Every
/// step adds uniform noise in `[-noise, noise]` plus a trend of
/// `(step / trend_interval) * trend_increment`, clipped at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub base_min: i64,
    pub base_max: i64,
    pub noise: i64,
    pub trend_interval: u64,
    pub trend_increment: i64,
    /// Fixed seed for reproducible runs; random when absent.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrafficError> {
        if self.base_min >= self.base_max {
            return Err(TrafficError::invalid_config(
                "base_max",
                format!("must exceed base_min ({})", self.base_min),
            ));
        }
        if self.noise < 0 {
            return Err(TrafficError::invalid_config("noise", "must not be negative"));
        }
        if self.trend_interval == 0 {
            return Err(TrafficError::invalid_config(
                "trend_interval",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_min: 10,
            base_max: 25,
            noise: 5,
            trend_interval: 5,
            trend_increment: 2,
            seed: None,
        }
    }
}

// ============================================================================
// Run Configuration
// ============================================================================

/// Everything a driver needs for one run, loadable from a single JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub traffic: TrafficConfig,
    pub generator: GeneratorConfig,
    /// Steps to simulate.
    pub steps: Option<usize>,
    /// Pause between steps in milliseconds.
    pub delay_ms: u64,
}

impl RunConfig {
    /// Steps used when none are configured.
    pub const DEFAULT_STEPS: usize = 20;

    pub fn steps(&self) -> usize {
        self.steps.unwrap_or(Self::DEFAULT_STEPS)
    }

    pub fn validate(&self) -> Result<(), TrafficError> {
        self.traffic.validate()?;
        self.generator.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

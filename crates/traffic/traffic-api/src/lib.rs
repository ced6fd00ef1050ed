//! Traffic Consumer API
//!
//! Consumer configurations and builder APIs for the traffic signal stack.
//!
//! This crate provides:
//! - [`TrafficConfig`] and its builder for intersection dimensions
//! - [`GeneratorConfig`] describing the synthetic demo stream
//! - [`RunConfig`] bundling both for drivers, loadable from JSON
//! - Re-exports from SPI and core for convenience

pub mod config;

pub use config::{
    ConfigError, GeneratorConfig, RunConfig, TrafficConfig, TrafficConfigBuilder,
};

// Re-export from core
pub use traffic_core::{
    allocator, estimator, history, manager, record, regression, HistoryBuffer,
    LinearTrendEstimator, ProportionalAllocator, SimulationLog, TrafficManager,
};

// Re-export traits from SPI
pub use traffic_spi::{
    CongestionEstimator, LaneTrend, Result, StepResult, TimingAllocator, TrafficError,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{GeneratorConfig, RunConfig, TrafficConfig, TrafficConfigBuilder};
    pub use traffic_core::prelude::*;
}

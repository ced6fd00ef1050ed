//! Traffic Service Provider Interface
//!
//! Defines the contracts, models and error type shared by every crate in the
//! traffic signal stack.
//!
//! - [`CongestionEstimator`]: Rolling per-lane history plus next-step forecast
//! - [`TimingAllocator`]: Splits a fixed signal cycle across lanes
//! - [`StepResult`]: Output of one simulated step
//! - [`TrafficError`]: Standardized error type
//! - [`Result`]: Convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{CongestionEstimator, TimingAllocator};
pub use error::{Result, TrafficError};
pub use model::{LaneTrend, PredictionVector, SignalTimingVector, StepResult};

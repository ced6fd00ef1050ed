//! Traffic Core Implementations
//!
//! Rolling history, forecasting and timing allocation for a single signalized
//! intersection:
//!
//! - [`history`]: Fixed-length circular window of lane observations
//! - [`regression`]: Numerically stable least-squares trend fit
//! - [`estimator`]: Independent per-lane linear trend forecasts
//! - [`allocator`]: Proportional split of the signal cycle
//! - [`manager`]: One-call step driver tying the pieces together
//! - [`record`]: Append-only log of step results for drivers
//!
//! ## Example
//!
//! ```rust
//! use traffic_core::prelude::*;
//!
//! let mut manager = TrafficManager::new(4, 10, 120.0).unwrap();
//! let result = manager.simulate_step(&[12.0, 18.0, 9.0, 20.0]).unwrap();
//! let total: f64 = result.signal_timings.iter().sum();
//! assert!((total - 120.0).abs() < 1e-9);
//! ```

pub mod allocator;
pub mod estimator;
pub mod history;
pub mod manager;
pub mod record;
pub mod regression;

// Re-export from SPI
pub use traffic_spi::{
    CongestionEstimator, LaneTrend, PredictionVector, Result, SignalTimingVector, StepResult,
    TimingAllocator, TrafficError,
};

// Re-export implementations for convenience
pub use allocator::{ProportionalAllocator, ZERO_DEMAND_EPSILON};
pub use estimator::LinearTrendEstimator;
pub use history::HistoryBuffer;
pub use manager::TrafficManager;
pub use record::{LaneSummary, LoggedStep, SeriesKind, SimulationLog};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::allocator::ProportionalAllocator;
    pub use crate::estimator::LinearTrendEstimator;
    pub use crate::history::HistoryBuffer;
    pub use crate::manager::TrafficManager;
    pub use crate::record::{SeriesKind, SimulationLog};
    pub use traffic_spi::{
        CongestionEstimator, Result, StepResult, TimingAllocator, TrafficError,
    };
}

//! Traffic Facade
//!
//! High-level API for lane congestion forecasting and signal timing. Re-exports
//! all public types from the traffic stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use traffic_facade::prelude::*;
//!
//! let mut manager = TrafficConfig::new(3, 5, 120.0).build_manager().unwrap();
//! let result = manager.simulate_step(&[10.0, 20.0, 30.0]).unwrap();
//! assert_eq!(result.signal_timings.len(), 3);
//! ```

// Re-export everything from API (which includes SPI and core)
pub use traffic_api::*;

// Explicit re-exports for documentation
pub use traffic_api::prelude;

// Re-export core types at root
pub use traffic_core::{LaneSummary, LoggedStep, SeriesKind, ZERO_DEMAND_EPSILON};

// Re-export SPI models
pub use traffic_spi::{PredictionVector, SignalTimingVector};

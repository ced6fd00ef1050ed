//! Error types for traffic operations
//!
//! This module provides the [`TrafficError`] enum and [`Result`] type alias.

mod traffic_error;

pub use traffic_error::{Result, TrafficError};

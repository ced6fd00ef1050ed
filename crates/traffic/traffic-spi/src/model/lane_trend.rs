//! Per-lane linear trend model

use serde::{Deserialize, Serialize};

/// Least-squares line fitted to one lane's history
///
/// Fits `count = intercept + slope * t` where `t` is the slot index inside
/// the history window (0 = oldest).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneTrend {
    /// Lane index
    pub lane: usize,
    /// Change in count per step
    pub slope: f64,
    /// Fitted count at t = 0
    pub intercept: f64,
    /// Coefficient of determination (1.0 for a flat, perfectly fitted lane)
    pub r_squared: f64,
}

impl LaneTrend {
    /// Evaluate the fitted line at time index `t`
    pub fn value_at(&self, t: f64) -> f64 {
        self.intercept + self.slope * t
    }

    /// Evaluate at `t` and clamp to zero, since counts cannot be negative
    pub fn forecast_at(&self, t: f64) -> f64 {
        self.value_at(t).max(0.0)
    }
}

//! Step result model

use serde::{Deserialize, Serialize};

/// Everything produced by one simulated step
///
/// Owned by the caller; the manager keeps nothing from it besides the
/// observation it pushed into the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Observation submitted for this step, echoed back
    pub latest_counts: Vec<f64>,
    /// Forecast for the next step, one entry per lane
    pub predicted_counts: Vec<f64>,
    /// Seconds of green per lane for the next cycle
    pub signal_timings: Vec<f64>,
}

impl StepResult {
    /// Number of lanes covered by this result
    pub fn num_lanes(&self) -> usize {
        self.signal_timings.len()
    }

    /// Sum of all lane forecasts
    pub fn total_predicted(&self) -> f64 {
        self.predicted_counts.iter().sum()
    }

    /// Sum of all lane timings (the cycle length, up to rounding)
    pub fn total_timing(&self) -> f64 {
        self.signal_timings.iter().sum()
    }

    /// Lane receiving the longest green, lowest index on ties
    pub fn busiest_lane(&self) -> Option<usize> {
        self.signal_timings
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &t)| match best {
                Some((_, b)) if b >= t => best,
                _ => Some((i, t)),
            })
            .map(|(i, _)| i)
    }
}

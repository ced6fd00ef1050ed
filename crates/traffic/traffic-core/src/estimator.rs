//! Per-lane linear trend congestion estimator
//!
//! Each lane is forecast by its own least-squares line over the history
//! window; lanes never influence each other.

use std::iter;

use crate::history::HistoryBuffer;
use crate::regression::{fit_trend, forecast_next};
use traffic_spi::{CongestionEstimator, LaneTrend, PredictionVector, Result};

/// Forecasts the next-step count of every lane by linear extrapolation
///
/// # Example
///
/// ```rust
/// use traffic_core::LinearTrendEstimator;
/// use traffic_spi::CongestionEstimator;
///
/// let mut estimator = LinearTrendEstimator::new(2, 3).unwrap();
/// for counts in [[1.0, 9.0], [2.0, 9.0], [3.0, 9.0]] {
///     estimator.update(&counts).unwrap();
/// }
/// let forecast = estimator.predict();
/// assert!((forecast[0] - 4.0).abs() < 1e-9);
/// assert!((forecast[1] - 9.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTrendEstimator {
    history: HistoryBuffer,
}

impl LinearTrendEstimator {
    /// Create an estimator with a zero-filled window
    pub fn new(num_lanes: usize, history_length: usize) -> Result<Self> {
        Ok(Self {
            history: HistoryBuffer::new(num_lanes, history_length)?,
        })
    }

    /// Read access to the window
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Length of the history window
    pub fn history_length(&self) -> usize {
        self.history.len()
    }

    /// Fit one independent trend per lane
    pub fn fit_lanes(&self) -> Vec<LaneTrend> {
        (0..self.history.num_lanes())
            .map(|lane| {
                let series: Vec<f64> = self.history.rows().map(|row| row[lane]).collect();
                let trend = fit_trend(lane, &series);
                tracing::trace!(
                    lane,
                    slope = trend.slope,
                    intercept = trend.intercept,
                    r_squared = trend.r_squared,
                    "fitted lane trend"
                );
                trend
            })
            .collect()
    }

    /// Per-lane forecast one step past `rows` (oldest first)
    fn forecast_rows(&self, rows: &[&[f64]]) -> PredictionVector {
        (0..self.history.num_lanes())
            .map(|lane| {
                let series: Vec<f64> = rows.iter().map(|row| row[lane]).collect();
                forecast_next(&series)
            })
            .collect()
    }
}

impl CongestionEstimator for LinearTrendEstimator {
    fn update(&mut self, counts: &[f64]) -> Result<()> {
        self.history.update(counts)
    }

    fn predict(&self) -> PredictionVector {
        let rows: Vec<&[f64]> = self.history.rows().collect();
        self.forecast_rows(&rows)
    }

    fn forecast_with(&self, counts: &[f64]) -> Result<PredictionVector> {
        self.history.check(counts)?;
        let rows: Vec<&[f64]> = self
            .history
            .rows()
            .skip(1)
            .chain(iter::once(counts))
            .collect();
        Ok(self.forecast_rows(&rows))
    }

    fn num_lanes(&self) -> usize {
        self.history.num_lanes()
    }
}

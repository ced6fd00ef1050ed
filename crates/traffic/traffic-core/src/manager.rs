//! Step-driven traffic manager
//!
//! Couples an estimator and an allocator: every step pushes one observation,
//! forecasts the next counts and re-splits the cycle. Steps are serialized by
//! `&mut self`; the manager never blocks, spawns work or touches I/O.

use crate::allocator::ProportionalAllocator;
use crate::estimator::LinearTrendEstimator;
use traffic_spi::{
    CongestionEstimator, PredictionVector, Result, SignalTimingVector, StepResult,
    TimingAllocator, TrafficError,
};

/// Owns the history window and produces a [`StepResult`] per observation
///
/// # Example
///
/// ```rust
/// use traffic_core::TrafficManager;
///
/// let mut manager = TrafficManager::new(3, 5, 120.0).unwrap();
/// let mut result = None;
/// for _ in 0..5 {
///     result = Some(manager.simulate_step(&[10.0, 10.0, 10.0]).unwrap());
/// }
/// let result = result.unwrap();
/// for t in &result.signal_timings {
///     assert!((t - 40.0).abs() < 1e-9);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TrafficManager<E = LinearTrendEstimator, A = ProportionalAllocator> {
    estimator: E,
    allocator: A,
    steps: u64,
    timings: SignalTimingVector,
}

impl TrafficManager {
    /// Build the default linear-trend / proportional manager
    ///
    /// Fails with [`TrafficError::InvalidConfiguration`] if any dimension is
    /// not positive.
    pub fn new(num_lanes: usize, history_length: usize, cycle_length: f64) -> Result<Self> {
        let estimator = LinearTrendEstimator::new(num_lanes, history_length)?;
        let allocator = ProportionalAllocator::new(num_lanes, cycle_length)?;
        Self::with_components(estimator, allocator)
    }

    /// Length of the history window
    pub fn history_length(&self) -> usize {
        self.estimator.history_length()
    }
}

impl<E: CongestionEstimator, A: TimingAllocator> TrafficManager<E, A> {
    /// Assemble a manager from any estimator and allocator pair
    pub fn with_components(estimator: E, allocator: A) -> Result<Self> {
        if estimator.num_lanes() != allocator.num_lanes() {
            return Err(TrafficError::invalid_config(
                "num_lanes",
                format!(
                    "estimator tracks {} lanes but allocator splits {}",
                    estimator.num_lanes(),
                    allocator.num_lanes()
                ),
            ));
        }

        let timings = allocator.equal_split();
        Ok(Self {
            estimator,
            allocator,
            steps: 0,
            timings,
        })
    }

    /// Run one full step: update, predict, allocate
    ///
    /// The forecast and timings are computed against the incoming counts
    /// before anything is committed, so an error from any stage changes
    /// nothing: the history, step counter and current timings are exactly as
    /// before the call.
    pub fn simulate_step(&mut self, new_counts: &[f64]) -> Result<StepResult> {
        let predicted = match self.estimator.forecast_with(new_counts) {
            Ok(predicted) => predicted,
            Err(err) => {
                tracing::warn!(error = %err, step = self.steps + 1, "rejected observation");
                return Err(err);
            }
        };
        let timings = self.allocator.allocate(&predicted)?;

        self.estimator.update(new_counts)?;
        self.steps += 1;
        self.timings.clone_from(&timings);

        tracing::debug!(
            step = self.steps,
            lanes = predicted.len(),
            total_predicted = predicted.iter().sum::<f64>(),
            "simulated step"
        );

        Ok(StepResult {
            latest_counts: new_counts.to_vec(),
            predicted_counts: predicted,
            signal_timings: timings,
        })
    }

    /// Push an observation without forecasting
    pub fn update(&mut self, new_counts: &[f64]) -> Result<()> {
        self.estimator.update(new_counts)
    }

    /// Forecast from the current history
    pub fn predict(&self) -> PredictionVector {
        self.estimator.predict()
    }

    /// Split the cycle for a given forecast
    pub fn allocate(&self, predicted: &[f64]) -> Result<SignalTimingVector> {
        self.allocator.allocate(predicted)
    }

    /// Timings from the last completed step, or the equal split before any
    pub fn current_timings(&self) -> &[f64] {
        &self.timings
    }

    /// Completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of lanes
    pub fn num_lanes(&self) -> usize {
        self.estimator.num_lanes()
    }

    /// Seconds in one signal cycle
    pub fn cycle_length(&self) -> f64 {
        self.allocator.cycle_length()
    }

    /// The underlying estimator
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// The underlying allocator
    pub fn allocator(&self) -> &A {
        &self.allocator
    }
}

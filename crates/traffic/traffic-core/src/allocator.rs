//! Proportional signal timing allocation
//!
//! Splits a fixed cycle across lanes in direct proportion to their predicted
//! demand. There is no minimum green: a lane forecast at zero gets zero
//! seconds. When total demand is (numerically) zero the cycle is split
//! equally instead.

use traffic_spi::{Result, SignalTimingVector, TimingAllocator, TrafficError};

/// Total predicted demand at or below this is treated as no demand
pub const ZERO_DEMAND_EPSILON: f64 = 1e-9;

/// Max-flow style allocator: green time follows predicted demand share
///
/// # Example
///
/// ```rust
/// use traffic_core::ProportionalAllocator;
/// use traffic_spi::TimingAllocator;
///
/// let allocator = ProportionalAllocator::new(4, 100.0).unwrap();
/// let timings = allocator.allocate(&[30.0, 10.0, 0.0, 0.0]).unwrap();
/// assert_eq!(timings, vec![75.0, 25.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionalAllocator {
    num_lanes: usize,
    cycle_length: f64,
}

impl ProportionalAllocator {
    /// Create an allocator for `num_lanes` lanes sharing `cycle_length` seconds
    pub fn new(num_lanes: usize, cycle_length: f64) -> Result<Self> {
        if num_lanes == 0 {
            return Err(TrafficError::invalid_config(
                "num_lanes",
                "must be at least 1",
            ));
        }
        if !cycle_length.is_finite() || cycle_length <= 0.0 {
            return Err(TrafficError::invalid_config(
                "cycle_length",
                format!("must be a positive finite number of seconds, got {}", cycle_length),
            ));
        }

        Ok(Self {
            num_lanes,
            cycle_length,
        })
    }
}

impl TimingAllocator for ProportionalAllocator {
    fn allocate(&self, predicted: &[f64]) -> Result<SignalTimingVector> {
        TrafficError::check_shape(self.num_lanes, predicted.len())?;
        if predicted.iter().any(|p| !p.is_finite()) {
            return Err(TrafficError::InvalidData(
                "predicted counts must be finite".to_string(),
            ));
        }

        // Estimator output is already non-negative; clamp for direct callers
        let demand: Vec<f64> = predicted.iter().map(|&p| p.max(0.0)).collect();
        let total: f64 = demand.iter().sum();

        if total <= ZERO_DEMAND_EPSILON {
            tracing::debug!(total, "no predicted demand, splitting cycle equally");
            return Ok(self.equal_split());
        }

        // Lanes near f64::MAX overflow the sum; rescale by the peak so the
        // shares stay finite and still add up to one
        let (demand, total) = if total.is_finite() {
            (demand, total)
        } else {
            let peak = demand.iter().fold(0.0, |m: f64, &d| m.max(d));
            let scaled: Vec<f64> = demand.iter().map(|&d| d / peak).collect();
            let total = scaled.iter().sum();
            (scaled, total)
        };

        Ok(demand
            .iter()
            .map(|&d| d / total * self.cycle_length)
            .collect())
    }

    fn cycle_length(&self) -> f64 {
        self.cycle_length
    }

    fn num_lanes(&self) -> usize {
        self.num_lanes
    }
}

//! Timing allocator trait

use crate::error::Result;
use crate::model::SignalTimingVector;

/// Splits a fixed signal cycle across lanes from a demand forecast
pub trait TimingAllocator {
    /// Allocate the cycle for the given per-lane forecast
    ///
    /// The returned vector has one entry per lane, no negative entries, and
    /// sums to [`cycle_length`](Self::cycle_length).
    fn allocate(&self, predicted: &[f64]) -> Result<SignalTimingVector>;

    /// Total seconds in one signal cycle
    fn cycle_length(&self) -> f64;

    /// Number of lanes sharing the cycle
    fn num_lanes(&self) -> usize;

    /// Allocation used before any forecast exists
    fn equal_split(&self) -> SignalTimingVector {
        let lanes = self.num_lanes();
        vec![self.cycle_length() / lanes as f64; lanes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrafficError;

    /// Mock allocator that hands the whole cycle to the busiest lane
    struct WinnerTakesAll {
        lanes: usize,
        cycle: f64,
    }

    impl TimingAllocator for WinnerTakesAll {
        fn allocate(&self, predicted: &[f64]) -> Result<SignalTimingVector> {
            TrafficError::check_shape(self.lanes, predicted.len())?;
            let busiest = predicted
                .iter()
                .enumerate()
                .fold(0, |best, (i, &p)| if p > predicted[best] { i } else { best });
            let mut timings = vec![0.0; self.lanes];
            timings[busiest] = self.cycle;
            Ok(timings)
        }

        fn cycle_length(&self) -> f64 {
            self.cycle
        }

        fn num_lanes(&self) -> usize {
            self.lanes
        }
    }

    #[test]
    fn test_default_equal_split() {
        let allocator = WinnerTakesAll {
            lanes: 4,
            cycle: 120.0,
        };
        assert_eq!(allocator.equal_split(), vec![30.0; 4]);
    }

    #[test]
    fn test_mock_allocation() {
        let allocator = WinnerTakesAll {
            lanes: 3,
            cycle: 90.0,
        };
        let timings = allocator.allocate(&[1.0, 7.0, 2.0]).unwrap();
        assert_eq!(timings, vec![0.0, 90.0, 0.0]);
        assert!(allocator.allocate(&[1.0]).is_err());
    }
}

//! Congestion estimator trait
//!
//! An estimator owns a rolling window of per-lane observations and produces
//! a one-step-ahead forecast from it.

use crate::error::Result;
use crate::model::PredictionVector;

/// Rolling-history forecaster for per-lane vehicle counts
///
/// # Example
///
/// ```rust,ignore
/// use traffic_spi::CongestionEstimator;
///
/// fn observe_and_forecast<E: CongestionEstimator>(
///     estimator: &mut E,
///     counts: &[f64],
/// ) -> traffic_spi::Result<Vec<f64>> {
///     estimator.update(counts)?;
///     Ok(estimator.predict())
/// }
/// ```
pub trait CongestionEstimator {
    /// Absorb one observation vector, evicting the oldest one
    ///
    /// Must leave the history untouched when it returns an error.
    fn update(&mut self, counts: &[f64]) -> Result<()>;

    /// Forecast the count for each lane one step past the window
    ///
    /// Every component is non-negative. Calling this twice without an
    /// intervening [`update`](Self::update) returns identical vectors.
    fn predict(&self) -> PredictionVector;

    /// Forecast as if `counts` had just been absorbed, without absorbing it
    ///
    /// Applies the same validation as [`update`](Self::update) and, on
    /// success, returns exactly what [`predict`](Self::predict) would return
    /// after `update(counts)`. Lets a caller finish every fallible step
    /// before committing the observation.
    fn forecast_with(&self, counts: &[f64]) -> Result<PredictionVector>;

    /// Number of lanes the estimator tracks
    fn num_lanes(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrafficError;

    /// Mock estimator that forecasts the last observation
    struct LastValueEstimator {
        last: Vec<f64>,
    }

    impl CongestionEstimator for LastValueEstimator {
        fn update(&mut self, counts: &[f64]) -> Result<()> {
            TrafficError::check_shape(self.last.len(), counts.len())?;
            self.last = counts.to_vec();
            Ok(())
        }

        fn predict(&self) -> PredictionVector {
            self.last.iter().map(|&c| c.max(0.0)).collect()
        }

        fn forecast_with(&self, counts: &[f64]) -> Result<PredictionVector> {
            TrafficError::check_shape(self.last.len(), counts.len())?;
            Ok(counts.iter().map(|&c| c.max(0.0)).collect())
        }

        fn num_lanes(&self) -> usize {
            self.last.len()
        }
    }

    fn observe<E: CongestionEstimator>(estimator: &mut E, counts: &[f64]) -> Result<Vec<f64>> {
        estimator.update(counts)?;
        Ok(estimator.predict())
    }

    #[test]
    fn test_generic_usage() {
        let mut estimator = LastValueEstimator {
            last: vec![0.0; 2],
        };
        let forecast = observe(&mut estimator, &[3.0, -1.0]).unwrap();
        assert_eq!(forecast, vec![3.0, 0.0]);
        assert_eq!(estimator.num_lanes(), 2);
    }

    #[test]
    fn test_rejected_update_keeps_state() {
        let mut estimator = LastValueEstimator {
            last: vec![1.0, 2.0],
        };
        assert!(estimator.update(&[5.0]).is_err());
        assert_eq!(estimator.predict(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_forecast_with_leaves_state() {
        let mut estimator = LastValueEstimator {
            last: vec![1.0, 2.0],
        };
        let ahead = estimator.forecast_with(&[7.0, -3.0]).unwrap();
        assert_eq!(estimator.predict(), vec![1.0, 2.0]);

        estimator.update(&[7.0, -3.0]).unwrap();
        assert_eq!(estimator.predict(), ahead);
    }

    #[test]
    fn test_trait_object() {
        let estimator: Box<dyn CongestionEstimator> = Box::new(LastValueEstimator {
            last: vec![4.0],
        });
        assert_eq!(estimator.predict(), vec![4.0]);
    }
}

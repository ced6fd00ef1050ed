//! Model module containing data types exchanged between components

mod lane_trend;
mod step_result;

pub use lane_trend::LaneTrend;
pub use step_result::StepResult;

/// One non-negative forecast per lane for the step after the history window
pub type PredictionVector = Vec<f64>;

/// Seconds of green per lane; sums to the cycle length
pub type SignalTimingVector = Vec<f64>;

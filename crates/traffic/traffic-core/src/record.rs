//! Append-only log of simulated steps
//!
//! Drivers that chart or export a run keep the [`StepResult`]s here and pull
//! per-lane series back out. The manager itself never retains results.

use serde::{Deserialize, Serialize};
use traffic_spi::StepResult;

/// Which vector of a [`StepResult`] a series is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// Observed counts
    Latest,
    /// Forecast counts
    Predicted,
    /// Allocated green seconds
    Timing,
}

impl SeriesKind {
    fn select(self, result: &StepResult) -> &[f64] {
        match self {
            SeriesKind::Latest => &result.latest_counts,
            SeriesKind::Predicted => &result.predicted_counts,
            SeriesKind::Timing => &result.signal_timings,
        }
    }
}

/// One logged step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedStep {
    /// 1-based step number
    pub step: u64,
    #[serde(flatten)]
    pub result: StepResult,
}

/// Per-lane averages over a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSummary {
    pub lane: usize,
    pub mean_count: f64,
    pub mean_predicted: f64,
    pub mean_timing: f64,
    pub max_timing: f64,
}

/// Chronological record of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationLog {
    steps: Vec<LoggedStep>,
}

impl SimulationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result under the next step number
    pub fn push(&mut self, result: StepResult) -> u64 {
        let step = self.steps.last().map_or(1, |s| s.step + 1);
        self.steps.push(LoggedStep { step, result });
        step
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedStep> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&LoggedStep> {
        self.steps.last()
    }

    /// Step numbers, the x axis of every series
    pub fn step_numbers(&self) -> Vec<u64> {
        self.steps.iter().map(|s| s.step).collect()
    }

    /// One lane's values over the run; `None` if the lane is out of range
    pub fn lane_series(&self, kind: SeriesKind, lane: usize) -> Option<Vec<f64>> {
        self.steps
            .iter()
            .map(|s| kind.select(&s.result).get(lane).copied())
            .collect()
    }

    /// Averages per lane, empty when nothing has been logged
    pub fn summary(&self) -> Vec<LaneSummary> {
        let Some(first) = self.steps.first() else {
            return Vec::new();
        };
        let n = self.steps.len() as f64;
        let mean = |kind: SeriesKind, lane: usize| -> f64 {
            self.steps
                .iter()
                .map(|s| kind.select(&s.result)[lane])
                .sum::<f64>()
                / n
        };

        (0..first.result.num_lanes())
            .map(|lane| LaneSummary {
                lane,
                mean_count: mean(SeriesKind::Latest, lane),
                mean_predicted: mean(SeriesKind::Predicted, lane),
                mean_timing: mean(SeriesKind::Timing, lane),
                max_timing: self
                    .steps
                    .iter()
                    .map(|s| s.result.signal_timings[lane])
                    .fold(f64::NEG_INFINITY, f64::max),
            })
            .collect()
    }
}

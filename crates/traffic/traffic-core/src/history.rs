//! Rolling per-lane observation window
//!
//! Holds exactly `history_length` observation vectors of `num_lanes` counts
//! each. New observations evict the oldest one. Storage is a flat circular
//! arena with a rotating head, so an update writes a single row instead of
//! shifting the whole window; reads always come back in chronological order
//! (index 0 = oldest, `history_length - 1` = newest).
//!
//! The window starts filled with zeros, so forecasts made before it has
//! seen `history_length` real observations are pulled toward zero.

use traffic_spi::{Result, TrafficError};

/// Fixed-length FIFO window of lane count vectors
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    /// Row-major storage, `history_length * num_lanes` counts
    data: Vec<f64>,
    num_lanes: usize,
    history_length: usize,
    /// Physical slot holding the oldest row
    head: usize,
    /// Real observations absorbed so far
    observations: usize,
}

impl HistoryBuffer {
    /// Create a zero-filled window
    ///
    /// # Arguments
    ///
    /// * `num_lanes` - Counts per observation, must be positive
    /// * `history_length` - Observations retained, must be positive
    pub fn new(num_lanes: usize, history_length: usize) -> Result<Self> {
        if num_lanes == 0 {
            return Err(TrafficError::invalid_config(
                "num_lanes",
                "must be at least 1",
            ));
        }
        if history_length == 0 {
            return Err(TrafficError::invalid_config(
                "history_length",
                "must be at least 1",
            ));
        }

        Ok(Self {
            data: vec![0.0; num_lanes * history_length],
            num_lanes,
            history_length,
            head: 0,
            observations: 0,
        })
    }

    /// Push a new observation, evicting the oldest row
    ///
    /// Fails with [`TrafficError::ShapeMismatch`] on a wrong-length vector
    /// and [`TrafficError::InvalidData`] on NaN or infinite counts. The
    /// window is untouched whenever an error is returned.
    pub fn update(&mut self, counts: &[f64]) -> Result<()> {
        self.check(counts)?;

        let start = self.head * self.num_lanes;
        self.data[start..start + self.num_lanes].copy_from_slice(counts);
        self.head = (self.head + 1) % self.history_length;
        self.observations = self.observations.saturating_add(1);
        Ok(())
    }

    /// Validate an observation without storing it
    ///
    /// Applies exactly the checks [`update`](Self::update) applies.
    pub fn check(&self, counts: &[f64]) -> Result<()> {
        TrafficError::check_shape(self.num_lanes, counts.len())?;
        if let Some(lane) = counts.iter().position(|c| !c.is_finite()) {
            return Err(TrafficError::InvalidData(format!(
                "lane {} count is not finite",
                lane
            )));
        }
        Ok(())
    }

    /// Number of lanes per observation
    pub fn num_lanes(&self) -> usize {
        self.num_lanes
    }

    /// Number of rows in the window (always `history_length`)
    pub fn len(&self) -> usize {
        self.history_length
    }

    /// Always false; the window is never empty, only zero-filled
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Real observations pushed so far
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Whether every slot now holds a real observation
    pub fn is_warm(&self) -> bool {
        self.observations >= self.history_length
    }

    /// Row at chronological index `index` (0 = oldest)
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.history_length {
            return None;
        }
        let slot = (self.head + index) % self.history_length;
        let start = slot * self.num_lanes;
        Some(&self.data[start..start + self.num_lanes])
    }

    /// Oldest retained row
    pub fn oldest(&self) -> &[f64] {
        let start = self.head * self.num_lanes;
        &self.data[start..start + self.num_lanes]
    }

    /// Most recently pushed row
    pub fn newest(&self) -> &[f64] {
        let slot = (self.head + self.history_length - 1) % self.history_length;
        let start = slot * self.num_lanes;
        &self.data[start..start + self.num_lanes]
    }

    /// Rows from oldest to newest
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.history_length).map(move |i| {
            let slot = (self.head + i) % self.history_length;
            let start = slot * self.num_lanes;
            &self.data[start..start + self.num_lanes]
        })
    }

    /// One lane's counts from oldest to newest
    pub fn lane_series(&self, lane: usize) -> Option<Vec<f64>> {
        if lane >= self.num_lanes {
            return None;
        }
        Some(self.rows().map(|row| row[lane]).collect())
    }
}

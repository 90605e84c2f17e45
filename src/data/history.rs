//! Bounded per-symbol history for sparklines and tick-to-tick comparisons.

use std::collections::{HashMap, VecDeque};

/// Default number of points retained per series.
pub const DEFAULT_HISTORY_CAP: usize = 40;

/// Rolling value history, one series per key.
///
/// Owned by the caller of a live view and handed to the sparkline
/// renderer each tick. Each series keeps at most `cap` points; recording
/// past the cap drops the oldest.
#[derive(Debug, Clone)]
pub struct SeriesHistory {
    cap: usize,
    series: HashMap<String, VecDeque<f64>>,
}

impl Default for SeriesHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl SeriesHistory {
    /// Create an empty history keeping `cap` points per series (at least 1).
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            series: HashMap::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Append the newest value for `key`.
    pub fn record(&mut self, key: &str, value: f64) {
        let values = self.series.entry(key.to_string()).or_default();
        values.push_back(value);
        while values.len() > self.cap {
            values.pop_front();
        }
    }

    /// Values for `key`, oldest first. Empty if nothing was recorded.
    pub fn values(&self, key: &str) -> Vec<f64> {
        self.series.get(key).map(|v| v.iter().copied().collect()).unwrap_or_default()
    }

    pub fn len(&self, key: &str) -> usize {
        self.series.get(key).map_or(0, VecDeque::len)
    }

    pub fn latest(&self, key: &str) -> Option<f64> {
        self.series.get(key)?.back().copied()
    }

    /// The value recorded just before the latest one.
    pub fn previous(&self, key: &str) -> Option<f64> {
        let values = self.series.get(key)?;
        values.len().checked_sub(2).and_then(|i| values.get(i)).copied()
    }

    /// Direction of the last move for `key`.
    ///
    /// Returns `None` until there are two points.
    pub fn last_move(&self, key: &str) -> Option<std::cmp::Ordering> {
        self.latest(key)?.partial_cmp(&self.previous(key)?)
    }
}

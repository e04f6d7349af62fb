use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::unix_millis_to_datetime;
use crate::core::resolver::{nearest_synthetic_index, nearest_timestamp_index};
use crate::core::window::ViewportWindow;

/// How sample positions are addressed on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineAddressing {
    /// Positions are Unix-millisecond timestamps, non-decreasing.
    Timestamps,
    /// Positions are the synthetic indices `0..N`.
    Index,
}

/// Ordered sample positions backing one backtest result.
///
/// Immutable once built; a new result builds a new timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    addressing: TimelineAddressing,
    positions: Vec<f64>,
}

impl Timeline {
    /// Builds a timeline for `sample_len` samples.
    ///
    /// Timestamps are used only when their length matches `sample_len` and
    /// every value is finite and non-decreasing. Anything else silently
    /// falls back to index addressing.
    #[must_use]
    pub fn new(timestamps: &[f64], sample_len: usize) -> Self {
        if timestamps.is_empty() || sample_len == 0 {
            return Self::indexed(sample_len);
        }
        if timestamps.len() != sample_len {
            warn!(
                timestamps = timestamps.len(),
                samples = sample_len,
                "timestamp length mismatch, using index addressing"
            );
            return Self::indexed(sample_len);
        }
        if !is_sorted_finite(timestamps) {
            warn!(
                samples = sample_len,
                "timestamps are not finite and non-decreasing, using index addressing"
            );
            return Self::indexed(sample_len);
        }

        Self {
            addressing: TimelineAddressing::Timestamps,
            positions: timestamps.to_vec(),
        }
    }

    /// Builds an index-addressed timeline of `len` samples.
    #[must_use]
    pub fn indexed(len: usize) -> Self {
        Self {
            addressing: TimelineAddressing::Index,
            positions: (0..len).map(|i| i as f64).collect(),
        }
    }

    #[must_use]
    pub fn addressing(&self) -> TimelineAddressing {
        self.addressing
    }

    #[must_use]
    pub fn is_timestamped(&self) -> bool {
        self.addressing == TimelineAddressing::Timestamps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    #[must_use]
    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Resolves a data-space value to the nearest sample index.
    ///
    /// Runs in `O(log N)` on timestamped timelines. Returns 0 for an empty
    /// timeline.
    #[must_use]
    pub fn resolve(&self, value: f64) -> usize {
        let resolved = match self.addressing {
            TimelineAddressing::Timestamps => nearest_timestamp_index(&self.positions, value),
            TimelineAddressing::Index => nearest_synthetic_index(self.positions.len(), value),
        };
        resolved.unwrap_or(0)
    }

    /// Positions covered by `window`.
    #[must_use]
    pub fn window_positions(&self, window: &ViewportWindow) -> &[f64] {
        window_slice(&self.positions, window)
    }

    /// Data-space extent `(first, last)` of the positions inside `window`.
    #[must_use]
    pub fn window_domain(&self, window: &ViewportWindow) -> Option<(f64, f64)> {
        let visible = self.window_positions(window);
        Some((*visible.first()?, *visible.last()?))
    }

    /// Formats a sample position for axis labels and tooltips.
    ///
    /// Timestamped timelines render a UTC `YYYY-MM-DD` date; index timelines
    /// render the plain integer.
    #[must_use]
    pub fn format_position(&self, value: f64) -> String {
        match self.addressing {
            TimelineAddressing::Timestamps => unix_millis_to_datetime(value)
                .map(|time| time.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| format!("{value}")),
            TimelineAddressing::Index => format!("{}", value.round() as i64),
        }
    }
}

/// Returns the part of a sample-aligned series covered by `window`.
///
/// Series shorter than the window are cut at their own length.
#[must_use]
pub fn window_slice<'a, T>(series: &'a [T], window: &ViewportWindow) -> &'a [T] {
    let end = window.end_index().min(series.len());
    let start = window.start_index().min(end);
    &series[start..end]
}

fn is_sorted_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite()) && values.windows(2).all(|pair| pair[0] <= pair[1])
}

//! Nearest-index resolution shared by zoom, pinch, brush and marker projection.
//!
//! Every caller goes through [`nearest_timestamp_index`] or
//! [`nearest_synthetic_index`] so tie-breaking is identical everywhere.

/// Returns the index of the timestamp closest to `value`.
///
/// `timestamps` must be sorted in non-decreasing order. Exact matches return
/// the first matching index; otherwise the two insertion neighbors are
/// compared and equidistant ties resolve to the lower index.
///
/// Returns `None` for an empty slice. `NaN` resolves to index 0.
#[must_use]
pub fn nearest_timestamp_index(timestamps: &[f64], value: f64) -> Option<usize> {
    if timestamps.is_empty() {
        return None;
    }
    if value.is_nan() {
        return Some(0);
    }

    let upper = timestamps.partition_point(|t| *t < value);
    if upper == 0 {
        return Some(0);
    }
    if upper == timestamps.len() {
        return Some(timestamps.len() - 1);
    }
    if timestamps[upper] == value {
        return Some(upper);
    }

    let lower = upper - 1;
    let below = value - timestamps[lower];
    let above = timestamps[upper] - value;
    if below <= above {
        Some(lower)
    } else {
        Some(upper)
    }
}

/// Treats `value` as an index into a series of `len` samples.
///
/// The value is rounded and clamped to `[0, len - 1]`; `NaN` maps to 0.
#[must_use]
pub fn nearest_synthetic_index(len: usize, value: f64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if value.is_nan() {
        return Some(0);
    }
    let max_index = (len - 1) as f64;
    Some(value.round().clamp(0.0, max_index) as usize)
}

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::timeline::Timeline;

/// Lower bound applied to the zoom fraction regardless of series length.
pub const DEFAULT_MIN_ZOOM_FRACTION: f64 = 0.02;

/// Zoom fractions this close to 1 count as full extent.
const FULL_EXTENT_EPSILON: f64 = 1e-9;

/// Typed viewport mutation produced by gestures or dashboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportIntent {
    SetZoom(f64),
    SetOffset(f64),
    /// Drag pan, in units of the current window width; positive moves later.
    PanByWindowFraction(f64),
    Reset,
    /// Anchored zoom: the sample nearest `center_value` stays under the gesture.
    ///
    /// `multiplier < 1` shrinks the window (zoom in).
    ZoomAroundValue { center_value: f64, multiplier: f64 },
    BrushRange { start_value: f64, end_value: f64 },
}

/// Visible slice of a timeline, expressed as zoom/offset fractions.
///
/// Invariants held after every mutation:
/// - `0 < end_index - start_index <= sample_count` (for non-empty series)
/// - `end_index <= sample_count`
/// - `offset_fraction == 0` whenever the window covers every sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportWindow {
    sample_count: usize,
    min_zoom_floor: f64,
    zoom_fraction: f64,
    offset_fraction: f64,
    start_index: usize,
    end_index: usize,
}

impl ViewportWindow {
    /// Creates a full-extent window over `sample_count` samples.
    #[must_use]
    pub fn new(sample_count: usize) -> Self {
        Self::with_min_zoom_floor(sample_count, DEFAULT_MIN_ZOOM_FRACTION)
    }

    /// Creates a full-extent window with a custom zoom floor.
    ///
    /// Non-finite or out-of-range floors fall back to the default.
    #[must_use]
    pub fn with_min_zoom_floor(sample_count: usize, min_zoom_floor: f64) -> Self {
        let min_zoom_floor = if min_zoom_floor.is_finite() && min_zoom_floor > 0.0 {
            min_zoom_floor.min(1.0)
        } else {
            DEFAULT_MIN_ZOOM_FRACTION
        };
        let mut window = Self {
            sample_count,
            min_zoom_floor,
            zoom_fraction: 1.0,
            offset_fraction: 0.0,
            start_index: 0,
            end_index: sample_count,
        };
        window.recompute();
        window
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub fn zoom_fraction(&self) -> f64 {
        self.zoom_fraction
    }

    #[must_use]
    pub fn offset_fraction(&self) -> f64 {
        self.offset_fraction
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Exclusive end of the visible slice.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    #[must_use]
    pub fn index_range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        self.index_range().contains(&index)
    }

    /// A series of at most one sample cannot be zoomed or panned.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.sample_count <= 1
    }

    #[must_use]
    pub fn is_full_extent(&self) -> bool {
        self.zoom_fraction >= 1.0 - FULL_EXTENT_EPSILON
    }

    /// Smallest allowed zoom fraction: `max(2 / N, floor)`, capped at 1.
    #[must_use]
    pub fn min_zoom_fraction(&self) -> f64 {
        if self.sample_count == 0 {
            return 1.0;
        }
        (2.0 / self.sample_count as f64)
            .max(self.min_zoom_floor)
            .min(1.0)
    }

    /// Returns `true` when the call changed the window.
    pub fn apply_zoom(&mut self, fraction: f64) -> bool {
        if self.is_degenerate() || !fraction.is_finite() {
            return false;
        }
        let before = *self;
        self.zoom_fraction = self.clamp_zoom(fraction);
        self.recompute();
        self.finish("zoom", before)
    }

    /// Returns `true` when the call changed the window.
    pub fn apply_offset(&mut self, fraction: f64) -> bool {
        if self.is_degenerate() || !fraction.is_finite() {
            return false;
        }
        let before = *self;
        self.offset_fraction = fraction.clamp(0.0, 1.0);
        self.recompute();
        self.finish("offset", before)
    }

    /// Shifts the window by `fraction` of its own width.
    ///
    /// Sub-sample movement accumulates in `offset_fraction`.
    pub fn apply_pan_by_window_fraction(&mut self, fraction: f64) -> bool {
        if self.is_degenerate() || !fraction.is_finite() || fraction == 0.0 {
            return false;
        }
        let size = self.window_size();
        let max_start = self.sample_count - size;
        if max_start == 0 {
            return false;
        }

        let before = *self;
        let delta_samples = fraction * size as f64;
        self.offset_fraction = (self.offset_fraction + delta_samples / max_start as f64).clamp(0.0, 1.0);
        self.recompute();
        self.finish("pan", before)
    }

    /// Anchored zoom around the sample nearest `center_value`.
    pub fn apply_zoom_around_value(
        &mut self,
        timeline: &Timeline,
        center_value: f64,
        multiplier: f64,
    ) -> bool {
        if !center_value.is_finite() {
            return false;
        }
        self.apply_zoom_around_index(timeline.resolve(center_value), multiplier)
    }

    /// Scales the window by `multiplier` and re-centers it on `center_index`.
    ///
    /// An identity multiplier is a no-op; non-finite or non-positive
    /// multipliers are ignored.
    pub fn apply_zoom_around_index(&mut self, center_index: usize, multiplier: f64) -> bool {
        if self.is_degenerate() || !multiplier.is_finite() || multiplier <= 0.0 {
            return false;
        }
        if (multiplier - 1.0).abs() <= f64::EPSILON {
            return false;
        }

        let before = *self;
        let zoom = self.clamp_zoom(self.zoom_fraction * multiplier);
        let size = self.window_size_for(zoom);
        let max_start = self.sample_count - size;
        let center = center_index.min(self.sample_count - 1);
        let start = center.saturating_sub(size / 2).min(max_start);

        self.zoom_fraction = zoom;
        self.offset_fraction = offset_for_start(start, max_start);
        self.recompute();
        self.finish("anchored zoom", before)
    }

    /// Zooms to the sample range spanned by two data values, in either order.
    pub fn apply_brush_range(&mut self, timeline: &Timeline, start_value: f64, end_value: f64) -> bool {
        if !start_value.is_finite() || !end_value.is_finite() {
            return false;
        }
        self.apply_brush_indices(timeline.resolve(start_value), timeline.resolve(end_value))
    }

    /// Zooms to `[min(a, b), max(a, b))`; spans under 2 samples are ignored.
    pub fn apply_brush_indices(&mut self, a: usize, b: usize) -> bool {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if self.is_degenerate() || high - low < 2 {
            return false;
        }
        let high = high.min(self.sample_count);
        if high.saturating_sub(low) < 2 {
            return false;
        }

        let before = *self;
        let zoom = self.clamp_zoom((high - low) as f64 / self.sample_count as f64);
        let size = self.window_size_for(zoom);
        let max_start = self.sample_count - size;
        let start = low.min(max_start);

        self.zoom_fraction = zoom;
        self.offset_fraction = offset_for_start(start, max_start);
        self.recompute();
        self.finish("brush", before)
    }

    /// Restores full extent.
    pub fn reset(&mut self) -> bool {
        let before = *self;
        self.zoom_fraction = 1.0;
        self.offset_fraction = 0.0;
        self.recompute();
        self.finish("reset", before)
    }

    /// Applies a typed intent; returns `true` when the window changed.
    pub fn apply(&mut self, timeline: &Timeline, intent: ViewportIntent) -> bool {
        match intent {
            ViewportIntent::SetZoom(fraction) => self.apply_zoom(fraction),
            ViewportIntent::SetOffset(fraction) => self.apply_offset(fraction),
            ViewportIntent::PanByWindowFraction(fraction) => {
                self.apply_pan_by_window_fraction(fraction)
            }
            ViewportIntent::Reset => self.reset(),
            ViewportIntent::ZoomAroundValue {
                center_value,
                multiplier,
            } => self.apply_zoom_around_value(timeline, center_value, multiplier),
            ViewportIntent::BrushRange {
                start_value,
                end_value,
            } => self.apply_brush_range(timeline, start_value, end_value),
        }
    }

    fn clamp_zoom(&self, fraction: f64) -> f64 {
        fraction.clamp(self.min_zoom_fraction(), 1.0)
    }

    fn window_size_for(&self, zoom: f64) -> usize {
        let n = self.sample_count;
        if n <= 1 {
            return n;
        }
        let size = (n as f64 * zoom).round() as usize;
        let floor = if n > 2 { 2 } else { 1 };
        size.clamp(floor, n)
    }

    fn recompute(&mut self) {
        if self.is_degenerate() {
            self.zoom_fraction = 1.0;
            self.offset_fraction = 0.0;
            self.start_index = 0;
            self.end_index = self.sample_count;
            return;
        }
        if self.is_full_extent() {
            self.zoom_fraction = 1.0;
            self.offset_fraction = 0.0;
        }

        let size = self.window_size_for(self.zoom_fraction);
        let max_start = self.sample_count - size;
        if max_start == 0 {
            self.offset_fraction = 0.0;
        }
        let start = (self.offset_fraction * max_start as f64)
            .round()
            .clamp(0.0, max_start as f64) as usize;
        self.start_index = start;
        self.end_index = start + size;
    }

    fn finish(&self, operation: &'static str, before: Self) -> bool {
        let changed = *self != before;
        if changed {
            debug!(
                operation,
                zoom = self.zoom_fraction,
                offset = self.offset_fraction,
                start = self.start_index,
                end = self.end_index,
                "viewport window changed"
            );
        }
        changed
    }
}

fn offset_for_start(start: usize, max_start: usize) -> f64 {
    if max_start == 0 {
        0.0
    } else {
        start as f64 / max_start as f64
    }
}

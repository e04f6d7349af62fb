use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{PixelPoint, SelectionRect, ViewportIntent};
use crate::render::CoordinateMapping;

use super::pointer_cache::{PointerCache, PointerId};

/// Wheel delta reported for one mouse-wheel notch.
const WHEEL_NOTCH_DELTA: f64 = 120.0;

/// Which gestures the recognizer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureBehavior {
    pub brushing: bool,
    pub pinch_zoom: bool,
    pub wheel_zoom: bool,
    /// Single-pointer drag pans instead of brushing when brushing is off.
    #[serde(default)]
    pub drag_pan: bool,
}

impl Default for GestureBehavior {
    fn default() -> Self {
        Self {
            brushing: true,
            pinch_zoom: true,
            wheel_zoom: true,
            drag_pan: false,
        }
    }
}

/// Numeric thresholds of the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureTuning {
    /// Brushes narrower than this are discarded on release.
    pub brush_commit_threshold_px: f64,
    /// Minimum relative pinch distance change before a zoom is emitted.
    pub pinch_min_relative_change: f64,
    /// Window growth per wheel notch; negative deltas shrink by the inverse.
    pub wheel_zoom_step_ratio: f64,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            brush_commit_threshold_px: 8.0,
            pinch_min_relative_change: 0.01,
            wheel_zoom_step_ratio: 0.1,
        }
    }
}

/// Exclusive gesture state; at most one non-idle gesture at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Brushing {
        start_px: f64,
        current_px: f64,
        area_top: f64,
        area_bottom: f64,
        pointer_id: PointerId,
    },
    Pinching {
        /// Distance at the last emitted zoom (or at gesture start).
        pointer_distance: f64,
        /// Data value under the live pointer midpoint.
        center_value: Option<f64>,
    },
    Panning {
        pointer_id: PointerId,
        last_x: f64,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_brushing(self) -> bool {
        matches!(self, Self::Brushing { .. })
    }

    #[must_use]
    pub fn is_pinching(self) -> bool {
        matches!(self, Self::Pinching { .. })
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}

/// Side effect requested by a gesture transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    /// The host must route this pointer's events to the chart until released.
    CapturePointer(PointerId),
    ReleasePointer(PointerId),
    Intent(ViewportIntent),
    /// Brush overlay changed; `None` removes it.
    SelectionChanged(Option<SelectionRect>),
}

pub type GestureEffects = SmallVec<[GestureEffect; 4]>;

/// Finite-state recognizer over plot-relative pointer and wheel input.
///
/// Brush and pinch are mutually exclusive and pinch always wins: a second
/// pointer cancels an in-progress brush. Wheel input never enters a state.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRecognizer {
    state: GestureState,
    pointers: PointerCache,
    behavior: GestureBehavior,
    tuning: GestureTuning,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureBehavior::default(), GestureTuning::default())
    }
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(behavior: GestureBehavior, tuning: GestureTuning) -> Self {
        Self {
            state: GestureState::Idle,
            pointers: PointerCache::default(),
            behavior,
            tuning,
        }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn pointers(&self) -> &PointerCache {
        &self.pointers
    }

    #[must_use]
    pub fn behavior(&self) -> GestureBehavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: GestureBehavior) {
        self.behavior = behavior;
    }

    #[must_use]
    pub fn tuning(&self) -> GestureTuning {
        self.tuning
    }

    pub fn set_tuning(&mut self, tuning: GestureTuning) {
        self.tuning = tuning;
    }

    /// Current brush overlay, if a brush is in progress.
    #[must_use]
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        match self.state {
            GestureState::Brushing {
                start_px,
                current_px,
                area_top,
                area_bottom,
                ..
            } => Some(SelectionRect::between(
                start_px,
                current_px,
                area_top,
                area_bottom,
            )),
            _ => None,
        }
    }

    pub fn pointer_down<M>(&mut self, id: PointerId, point: PixelPoint, mapping: &M) -> GestureEffects
    where
        M: CoordinateMapping + ?Sized,
    {
        let mut effects = GestureEffects::new();
        if !point.is_finite() {
            return effects;
        }
        self.pointers.insert(id, point);

        match self.pointers.len() {
            1 => self.begin_single_pointer(id, point, mapping, &mut effects),
            2 if self.behavior.pinch_zoom => self.begin_pinch(mapping, &mut effects),
            _ => {}
        }
        effects
    }

    pub fn pointer_move<M>(&mut self, id: PointerId, point: PixelPoint, mapping: &M) -> GestureEffects
    where
        M: CoordinateMapping + ?Sized,
    {
        let mut effects = GestureEffects::new();
        if !point.is_finite() || !self.pointers.update(id, point) {
            return effects;
        }

        match self.state {
            GestureState::Brushing {
                start_px,
                area_top,
                area_bottom,
                pointer_id,
                ..
            } if pointer_id == id => {
                let current_px = mapping.plot_area().clamp_x(point.x);
                self.state = GestureState::Brushing {
                    start_px,
                    current_px,
                    area_top,
                    area_bottom,
                    pointer_id,
                };
                effects.push(GestureEffect::SelectionChanged(self.selection_rect()));
            }
            GestureState::Pinching {
                pointer_distance, ..
            } => {
                if let Some(intent) = self.track_pinch(pointer_distance, mapping) {
                    effects.push(GestureEffect::Intent(intent));
                }
            }
            GestureState::Panning { pointer_id, last_x } if pointer_id == id => {
                let delta_px = point.x - last_x;
                self.state = GestureState::Panning {
                    pointer_id,
                    last_x: point.x,
                };
                let width = mapping.plot_area().width();
                if delta_px != 0.0 && width > 0.0 {
                    effects.push(GestureEffect::Intent(ViewportIntent::PanByWindowFraction(
                        -delta_px / width,
                    )));
                }
            }
            GestureState::Idle
            | GestureState::Brushing { .. }
            | GestureState::Panning { .. } => {}
        }
        effects
    }

    /// Release of a pointer; a brush commits when wide enough.
    pub fn pointer_up<M>(&mut self, id: PointerId, point: PixelPoint, mapping: &M) -> GestureEffects
    where
        M: CoordinateMapping + ?Sized,
    {
        let mut effects = GestureEffects::new();
        let pinch_pair = self.pointers.first_pair();
        self.pointers.remove(id);

        match self.state {
            GestureState::Brushing {
                start_px,
                current_px,
                pointer_id,
                ..
            } if pointer_id == id => {
                let end_px = if point.x.is_finite() {
                    mapping.plot_area().clamp_x(point.x)
                } else {
                    current_px
                };
                if let Some(intent) = self.brush_commit(start_px, end_px, mapping) {
                    effects.push(GestureEffect::Intent(intent));
                }
                self.end_brush(pointer_id, &mut effects);
            }
            GestureState::Pinching { .. } if self.pointers.len() < 2 => {
                self.transition(GestureState::Idle);
            }
            GestureState::Pinching { .. } => {
                if self.pointers.first_pair() != pinch_pair {
                    let center_value = self
                        .pointers
                        .first_pair()
                        .and_then(|(p0, p1)| mapping.value_for_pixel(p0.midpoint(p1).x));
                    self.rebaseline_pinch(center_value);
                }
            }
            GestureState::Panning { pointer_id, .. } if pointer_id == id => {
                effects.push(GestureEffect::ReleasePointer(pointer_id));
                self.transition(GestureState::Idle);
            }
            GestureState::Idle | GestureState::Brushing { .. } | GestureState::Panning { .. } => {}
        }

        if self.pointers.is_empty() && !self.state.is_idle() {
            self.abandon(&mut effects);
        }
        effects
    }

    /// Pointer left the surface; behaves like a release.
    pub fn pointer_leave<M>(&mut self, id: PointerId, point: PixelPoint, mapping: &M) -> GestureEffects
    where
        M: CoordinateMapping + ?Sized,
    {
        if !self.pointers.contains(id) {
            return GestureEffects::new();
        }
        self.pointer_up(id, point, mapping)
    }

    /// Pointer cancelled or capture lost: the gesture ends without committing.
    pub fn pointer_cancel(&mut self, id: PointerId) -> GestureEffects {
        let mut effects = GestureEffects::new();
        let pinch_pair = self.pointers.first_pair();
        if self.pointers.remove(id).is_none() {
            return effects;
        }

        let involved = match self.state {
            GestureState::Brushing { pointer_id, .. } | GestureState::Panning { pointer_id, .. } => {
                pointer_id == id
            }
            GestureState::Pinching { .. } => self.pointers.len() < 2,
            GestureState::Idle => false,
        };
        if involved || self.pointers.is_empty() {
            self.abandon(&mut effects);
        } else if let GestureState::Pinching { center_value, .. } = self.state {
            if self.pointers.first_pair() != pinch_pair {
                self.rebaseline_pinch(center_value);
            }
        }
        effects
    }

    /// Wheel zoom anchored at the pointer; never touches the gesture state.
    ///
    /// One notch (`delta_y = ±120`) scales the window by
    /// `(1 + wheel_zoom_step_ratio)^(delta_y / 120)`; negative deltas zoom in.
    pub fn wheel<M>(&self, point: PixelPoint, delta_y: f64, mapping: &M) -> Option<ViewportIntent>
    where
        M: CoordinateMapping + ?Sized,
    {
        if !self.behavior.wheel_zoom || !point.x.is_finite() {
            return None;
        }
        let multiplier = self.wheel_multiplier(delta_y)?;
        let center_value = mapping.value_for_pixel(point.x)?;
        Some(ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier,
        })
    }

    /// Window-size multiplier for a wheel delta; `None` for zero or non-finite deltas.
    #[must_use]
    pub fn wheel_multiplier(&self, delta_y: f64) -> Option<f64> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return None;
        }
        Some((1.0 + self.tuning.wheel_zoom_step_ratio).powf(delta_y / WHEEL_NOTCH_DELTA))
    }

    /// Drops every pointer and returns to idle, e.g. when a new result loads.
    pub fn reset(&mut self) -> GestureEffects {
        let mut effects = GestureEffects::new();
        self.abandon(&mut effects);
        self.pointers.clear();
        effects
    }

    fn begin_single_pointer<M>(
        &mut self,
        id: PointerId,
        point: PixelPoint,
        mapping: &M,
        effects: &mut GestureEffects,
    ) where
        M: CoordinateMapping + ?Sized,
    {
        if !self.state.is_idle() {
            return;
        }
        let area = mapping.plot_area();
        if !area.contains(point) {
            return;
        }

        if self.behavior.brushing {
            self.transition(GestureState::Brushing {
                start_px: point.x,
                current_px: point.x,
                area_top: area.top,
                area_bottom: area.bottom,
                pointer_id: id,
            });
            effects.push(GestureEffect::CapturePointer(id));
        } else if self.behavior.drag_pan {
            self.transition(GestureState::Panning {
                pointer_id: id,
                last_x: point.x,
            });
            effects.push(GestureEffect::CapturePointer(id));
        }
    }

    fn begin_pinch<M>(&mut self, mapping: &M, effects: &mut GestureEffects)
    where
        M: CoordinateMapping + ?Sized,
    {
        let Some((p0, p1)) = self.pointers.first_pair() else {
            return;
        };

        match self.state {
            GestureState::Brushing { pointer_id, .. } => self.end_brush(pointer_id, effects),
            GestureState::Panning { pointer_id, .. } => {
                effects.push(GestureEffect::ReleasePointer(pointer_id));
            }
            GestureState::Idle | GestureState::Pinching { .. } => {}
        }

        self.transition(GestureState::Pinching {
            pointer_distance: p0.distance_to(p1),
            center_value: mapping.value_for_pixel(p0.midpoint(p1).x),
        });
    }

    fn track_pinch<M>(&mut self, previous_distance: f64, mapping: &M) -> Option<ViewportIntent>
    where
        M: CoordinateMapping + ?Sized,
    {
        let (p0, p1) = self.pointers.first_pair()?;
        let distance = p0.distance_to(p1);
        let center_value = mapping.value_for_pixel(p0.midpoint(p1).x);

        if previous_distance <= 0.0 || distance <= 0.0 {
            self.state = GestureState::Pinching {
                pointer_distance: distance,
                center_value,
            };
            return None;
        }

        let relative_change = (distance - previous_distance).abs() / previous_distance;
        if relative_change < self.tuning.pinch_min_relative_change {
            self.state = GestureState::Pinching {
                pointer_distance: previous_distance,
                center_value,
            };
            return None;
        }

        let Some(center) = center_value else {
            self.state = GestureState::Pinching {
                pointer_distance: previous_distance,
                center_value: None,
            };
            return None;
        };

        self.state = GestureState::Pinching {
            pointer_distance: distance,
            center_value,
        };
        Some(ViewportIntent::ZoomAroundValue {
            center_value: center,
            multiplier: previous_distance / distance,
        })
    }

    /// Restarts pinch tracking on the current two oldest pointers.
    fn rebaseline_pinch(&mut self, center_value: Option<f64>) {
        let Some((p0, p1)) = self.pointers.first_pair() else {
            return;
        };
        self.transition(GestureState::Pinching {
            pointer_distance: p0.distance_to(p1),
            center_value,
        });
    }

    fn brush_commit<M>(&self, start_px: f64, end_px: f64, mapping: &M) -> Option<ViewportIntent>
    where
        M: CoordinateMapping + ?Sized,
    {
        if (end_px - start_px).abs() < self.tuning.brush_commit_threshold_px {
            trace!(start_px, end_px, "brush below commit threshold, discarded");
            return None;
        }
        Some(ViewportIntent::BrushRange {
            start_value: mapping.value_for_pixel(start_px)?,
            end_value: mapping.value_for_pixel(end_px)?,
        })
    }

    fn end_brush(&mut self, pointer_id: PointerId, effects: &mut GestureEffects) {
        effects.push(GestureEffect::SelectionChanged(None));
        effects.push(GestureEffect::ReleasePointer(pointer_id));
        self.transition(GestureState::Idle);
    }

    fn abandon(&mut self, effects: &mut GestureEffects) {
        match self.state {
            GestureState::Brushing { pointer_id, .. } => self.end_brush(pointer_id, effects),
            GestureState::Panning { pointer_id, .. } => {
                effects.push(GestureEffect::ReleasePointer(pointer_id));
                self.transition(GestureState::Idle);
            }
            GestureState::Pinching { .. } => self.transition(GestureState::Idle),
            GestureState::Idle => {}
        }
    }

    fn transition(&mut self, next: GestureState) {
        trace!(from = ?self.state, to = ?next, "gesture transition");
        self.state = next;
    }
}

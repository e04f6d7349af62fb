use tracing::{debug, trace, warn};

use crate::core::{Timeline, ViewportIntent, ViewportWindow, window_slice};
use crate::error::ChartResult;
use crate::extensions::MarkerPoint;
use crate::interaction::{
    GestureEffect, GestureEffects, GestureRecognizer, GestureState, PointerId, PointerInput,
    WheelInput,
};
use crate::render::{RenderFrame, Renderer};

use super::{BacktestFeed, ChartKind, RedrawScheduler, RedrawStats, ViewportConfig};

/// What the host must do after dispatching one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    /// Pointer the host must capture (e.g. `setPointerCapture`).
    pub capture: Option<PointerId>,
    /// Pointer the host must release.
    pub release: Option<PointerId>,
    pub window_changed: bool,
    pub redraw_scheduled: bool,
}

/// Single owner of timeline, window, gesture state and redraw scheduling.
///
/// Dashboards drive it through the control surface (`set_zoom`, `set_offset`,
/// `reset_window`, `on_brush`, `on_wheel_zoom`, `on_pinch_zoom`) and the raw
/// input dispatchers; the gesture state and pointer cache are read-only from
/// outside. Renderer updates happen only in [`ViewportController::flush`].
pub struct ViewportController<R: Renderer> {
    renderer: R,
    config: ViewportConfig,
    feed: BacktestFeed,
    timeline: Timeline,
    window: ViewportWindow,
    recognizer: GestureRecognizer,
    scheduler: RedrawScheduler,
    markers: Vec<MarkerPoint>,
}

impl<R: Renderer> ViewportController<R> {
    pub fn new(renderer: R, config: ViewportConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        Ok(Self {
            renderer,
            config,
            feed: BacktestFeed::default(),
            timeline: Timeline::indexed(0),
            window: ViewportWindow::with_min_zoom_floor(0, config.min_zoom_fraction),
            recognizer: GestureRecognizer::new(config.gesture_behavior, config.gesture_tuning()),
            scheduler: RedrawScheduler::new(),
            markers: Vec::new(),
        })
    }

    /// Installs a new backtest result and resets the window to full extent.
    pub fn load_feed(&mut self, feed: BacktestFeed) -> ChartResult<()> {
        self.timeline = feed.timeline();
        self.feed = feed;
        self.window =
            ViewportWindow::with_min_zoom_floor(self.timeline.len(), self.config.min_zoom_fraction);
        self.recognizer.reset();
        self.markers.clear();
        debug!(
            samples = self.timeline.len(),
            timestamped = self.timeline.is_timestamped(),
            trades = self.feed.trades.len(),
            "backtest feed loaded"
        );

        self.sync_visible_domain()?;
        self.scheduler.schedule();
        Ok(())
    }

    pub fn load_feed_json(&mut self, input: &str) -> ChartResult<()> {
        let feed = BacktestFeed::from_json_str(input)?;
        self.load_feed(feed)
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Replaces the configuration, keeping the current zoom and offset.
    pub fn set_config(&mut self, config: ViewportConfig) -> ChartResult<()> {
        let config = config.validate()?;
        self.config = config;
        self.recognizer.set_behavior(config.gesture_behavior);
        self.recognizer.set_tuning(config.gesture_tuning());

        let previous = self.window;
        self.window =
            ViewportWindow::with_min_zoom_floor(self.timeline.len(), config.min_zoom_fraction);
        self.window.apply_zoom(previous.zoom_fraction());
        self.window.apply_offset(previous.offset_fraction());
        self.scheduler.schedule();
        Ok(())
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        if self.config.chart_kind != kind {
            self.config.chart_kind = kind;
            self.scheduler.schedule();
        }
    }

    pub fn set_zoom(&mut self, fraction: f64) -> bool {
        self.apply_intent(ViewportIntent::SetZoom(fraction))
    }

    pub fn set_offset(&mut self, fraction: f64) -> bool {
        self.apply_intent(ViewportIntent::SetOffset(fraction))
    }

    pub fn reset_window(&mut self) -> bool {
        self.apply_intent(ViewportIntent::Reset)
    }

    /// Zooms to a data-space range, in either order.
    pub fn on_brush(&mut self, range: (f64, f64)) -> bool {
        self.apply_intent(ViewportIntent::BrushRange {
            start_value: range.0,
            end_value: range.1,
        })
    }

    /// Wheel zoom anchored at a data value; negative deltas zoom in.
    pub fn on_wheel_zoom(&mut self, center_value: f64, delta_y: f64) -> bool {
        if !self.config.gesture_behavior.wheel_zoom {
            return false;
        }
        let Some(multiplier) = self.recognizer.wheel_multiplier(delta_y) else {
            return false;
        };
        self.apply_intent(ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier,
        })
    }

    /// Pinch zoom anchored at a data value.
    ///
    /// `ratio` is current over previous pointer distance; spreading the
    /// fingers (`ratio > 1`) zooms in.
    pub fn on_pinch_zoom(&mut self, center_value: f64, ratio: f64) -> bool {
        if !self.config.gesture_behavior.pinch_zoom || !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        self.apply_intent(ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier: 1.0 / ratio,
        })
    }

    /// Applies an intent to the window; schedules a redraw on change.
    pub fn apply_intent(&mut self, intent: ViewportIntent) -> bool {
        let changed = self.window.apply(&self.timeline, intent);
        if changed {
            self.scheduler.schedule();
        } else {
            trace!(?intent, "intent left the window unchanged");
        }
        changed
    }

    pub fn pointer_down(&mut self, input: PointerInput) -> InputOutcome {
        let point = input.to_plot(self.renderer.surface_origin());
        let effects = self
            .recognizer
            .pointer_down(input.pointer_id, point, &self.renderer);
        self.handle_effects(effects)
    }

    pub fn pointer_move(&mut self, input: PointerInput) -> InputOutcome {
        let point = input.to_plot(self.renderer.surface_origin());
        let effects = self
            .recognizer
            .pointer_move(input.pointer_id, point, &self.renderer);
        self.handle_effects(effects)
    }

    pub fn pointer_up(&mut self, input: PointerInput) -> InputOutcome {
        let point = input.to_plot(self.renderer.surface_origin());
        let effects = self
            .recognizer
            .pointer_up(input.pointer_id, point, &self.renderer);
        self.handle_effects(effects)
    }

    pub fn pointer_leave(&mut self, input: PointerInput) -> InputOutcome {
        let point = input.to_plot(self.renderer.surface_origin());
        let effects = self
            .recognizer
            .pointer_leave(input.pointer_id, point, &self.renderer);
        self.handle_effects(effects)
    }

    /// Pointer cancelled or capture lost; the active gesture is abandoned.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> InputOutcome {
        let effects = self.recognizer.pointer_cancel(pointer_id);
        self.handle_effects(effects)
    }

    pub fn wheel(&mut self, input: WheelInput) -> InputOutcome {
        let point = input.to_plot(self.renderer.surface_origin());
        let mut effects = GestureEffects::new();
        if let Some(intent) = self.recognizer.wheel(point, input.delta_y, &self.renderer) {
            effects.push(GestureEffect::Intent(intent));
        }
        self.handle_effects(effects)
    }

    /// Animation-frame tick: performs at most one renderer update.
    ///
    /// Returns the delivered animation key, or `None` when nothing was
    /// scheduled.
    pub fn flush(&mut self) -> ChartResult<Option<u64>> {
        let Some(animation_key) = self.scheduler.take_pending() else {
            return Ok(None);
        };

        self.sync_visible_domain()?;
        self.markers = self.project_markers();

        let frame = RenderFrame {
            animation_key,
            window: self.window,
            visible_domain: self.timeline.window_domain(&self.window),
            positions: self.timeline.window_positions(&self.window),
            price: window_slice(&self.feed.price_series, &self.window),
            equity: window_slice(&self.feed.equity_curve, &self.window),
            drawdown: window_slice(&self.feed.drawdown_curve, &self.window),
            markers: &self.markers,
            selection: self.recognizer.selection_rect(),
        };
        if let Err(err) = self.renderer.redraw(&frame) {
            warn!(animation_key, error = %err, "renderer redraw failed");
            return Err(err);
        }
        trace!(animation_key, markers = self.markers.len(), "frame delivered");
        Ok(Some(animation_key))
    }

    #[must_use]
    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn feed(&self) -> &BacktestFeed {
        &self.feed
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.recognizer.state()
    }

    #[must_use]
    pub fn active_pointer_count(&self) -> usize {
        self.recognizer.pointers().len()
    }

    /// Markers projected by the last delivered frame.
    #[must_use]
    pub fn visible_markers(&self) -> &[MarkerPoint] {
        &self.markers
    }

    #[must_use]
    pub fn is_redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub fn redraw_stats(&self) -> RedrawStats {
        self.scheduler.stats()
    }

    /// Axis label for a data-space position.
    #[must_use]
    pub fn format_position(&self, value: f64) -> String {
        self.timeline.format_position(value)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn project_markers(&self) -> Vec<MarkerPoint> {
        self.config.marker_projection().project(
            &self.feed.trades,
            &self.timeline,
            self.feed.series_for(self.config.chart_kind),
            &self.window,
            &self.renderer,
        )
    }

    fn sync_visible_domain(&mut self) -> ChartResult<()> {
        match self.timeline.window_domain(&self.window) {
            Some((start, end)) => self.renderer.set_visible_domain(start, end),
            None => Ok(()),
        }
    }

    fn handle_effects(&mut self, effects: GestureEffects) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        for effect in effects {
            match effect {
                GestureEffect::CapturePointer(id) => outcome.capture = Some(id),
                GestureEffect::ReleasePointer(id) => outcome.release = Some(id),
                GestureEffect::Intent(intent) => {
                    if self.window.apply(&self.timeline, intent) {
                        outcome.window_changed = true;
                    }
                }
                GestureEffect::SelectionChanged(_) => outcome.redraw_scheduled = true,
            }
        }

        if outcome.window_changed {
            outcome.redraw_scheduled = true;
        }
        if outcome.redraw_scheduled {
            self.scheduler.schedule();
        }
        outcome
    }
}

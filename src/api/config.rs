use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_MIN_ZOOM_FRACTION;
use crate::error::{ChartError, ChartResult};
use crate::extensions::{DEFAULT_MAX_TRADE_MARKERS, MarkerProjection, MarkerValueSource};
use crate::interaction::{GestureBehavior, GestureTuning};

/// Which series the chart shows; decides where marker y values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartKind {
    #[default]
    Price,
    Equity,
    Drawdown,
}

impl ChartKind {
    #[must_use]
    pub fn marker_value_source(self) -> MarkerValueSource {
        match self {
            Self::Price => MarkerValueSource::TradePrice,
            Self::Equity | Self::Drawdown => MarkerValueSource::SeriesValue,
        }
    }
}

/// Public controller configuration.
///
/// Serializable so dashboards can keep chart preferences next to their own
/// form state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub chart_kind: ChartKind,
    #[serde(default)]
    pub gesture_behavior: GestureBehavior,
    #[serde(default = "default_brush_commit_threshold_px")]
    pub brush_commit_threshold_px: f64,
    #[serde(default = "default_pinch_min_relative_change")]
    pub pinch_min_relative_change: f64,
    #[serde(default = "default_wheel_zoom_step_ratio")]
    pub wheel_zoom_step_ratio: f64,
    #[serde(default = "default_min_zoom_fraction")]
    pub min_zoom_fraction: f64,
    #[serde(default = "default_max_trade_markers")]
    pub max_trade_markers: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(ChartKind::default())
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn new(chart_kind: ChartKind) -> Self {
        Self {
            chart_kind,
            gesture_behavior: GestureBehavior::default(),
            brush_commit_threshold_px: default_brush_commit_threshold_px(),
            pinch_min_relative_change: default_pinch_min_relative_change(),
            wheel_zoom_step_ratio: default_wheel_zoom_step_ratio(),
            min_zoom_fraction: default_min_zoom_fraction(),
            max_trade_markers: default_max_trade_markers(),
        }
    }

    #[must_use]
    pub fn with_gesture_behavior(mut self, behavior: GestureBehavior) -> Self {
        self.gesture_behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_max_trade_markers(mut self, max_trade_markers: usize) -> Self {
        self.max_trade_markers = max_trade_markers;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.brush_commit_threshold_px.is_finite() || self.brush_commit_threshold_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "brush commit threshold must be finite and >= 0".to_owned(),
            ));
        }
        if !self.pinch_min_relative_change.is_finite() || self.pinch_min_relative_change < 0.0 {
            return Err(ChartError::InvalidConfig(
                "pinch relative change must be finite and >= 0".to_owned(),
            ));
        }
        if !self.wheel_zoom_step_ratio.is_finite() || self.wheel_zoom_step_ratio <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "wheel zoom step ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_zoom_fraction.is_finite()
            || self.min_zoom_fraction <= 0.0
            || self.min_zoom_fraction > 1.0
        {
            return Err(ChartError::InvalidConfig(
                "min zoom fraction must be in (0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn gesture_tuning(self) -> GestureTuning {
        GestureTuning {
            brush_commit_threshold_px: self.brush_commit_threshold_px,
            pinch_min_relative_change: self.pinch_min_relative_change,
            wheel_zoom_step_ratio: self.wheel_zoom_step_ratio,
        }
    }

    #[must_use]
    pub fn marker_projection(self) -> MarkerProjection {
        MarkerProjection::new(self.chart_kind.marker_value_source())
            .with_max_trades(self.max_trade_markers)
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize viewport config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse viewport config: {e}")))?;
        config.validate()
    }
}

fn default_brush_commit_threshold_px() -> f64 {
    GestureTuning::default().brush_commit_threshold_px
}

fn default_pinch_min_relative_change() -> f64 {
    GestureTuning::default().pinch_min_relative_change
}

fn default_wheel_zoom_step_ratio() -> f64 {
    GestureTuning::default().wheel_zoom_step_ratio
}

fn default_min_zoom_fraction() -> f64 {
    DEFAULT_MIN_ZOOM_FRACTION
}

fn default_max_trade_markers() -> usize {
    DEFAULT_MAX_TRADE_MARKERS
}

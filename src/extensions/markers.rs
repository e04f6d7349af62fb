use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Timeline, Trade, TradeSide, ViewportWindow};
use crate::render::CoordinateMapping;

/// Most recent trades considered for projection.
pub const DEFAULT_MAX_TRADE_MARKERS: usize = 200;

/// Where a marker's y value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerValueSource {
    /// Price chart: the fill's own price.
    TradePrice,
    /// Equity chart: the series value at the resolved sample.
    SeriesValue,
}

/// Trade marker placed on the visible window.
///
/// Derived and read-only; recomputed whenever the window or trades change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPoint {
    /// Index into the full trade list.
    pub trade_index: usize,
    pub sample_index: usize,
    /// Timestamp or synthetic index of the resolved sample.
    pub position: f64,
    pub value: f64,
    pub pixel_x: f64,
    pub side: TradeSide,
    pub qty: f64,
    pub realized_pnl: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerProjection {
    pub value_source: MarkerValueSource,
    pub max_trades: usize,
}

impl Default for MarkerProjection {
    fn default() -> Self {
        Self {
            value_source: MarkerValueSource::TradePrice,
            max_trades: DEFAULT_MAX_TRADE_MARKERS,
        }
    }
}

impl MarkerProjection {
    #[must_use]
    pub fn new(value_source: MarkerValueSource) -> Self {
        Self {
            value_source,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_trades(mut self, max_trades: usize) -> Self {
        self.max_trades = max_trades;
        self
    }

    /// Projects the most recent trades onto the visible window.
    ///
    /// Output is ordered by pixel x, then trade index.
    pub fn project<M>(
        &self,
        trades: &[Trade],
        timeline: &Timeline,
        series: &[f64],
        window: &ViewportWindow,
        mapping: &M,
    ) -> Vec<MarkerPoint>
    where
        M: CoordinateMapping + ?Sized,
    {
        if timeline.is_empty() || trades.is_empty() {
            return Vec::new();
        }

        let first = trades.len().saturating_sub(self.max_trades);
        let mut markers = trades[first..]
            .iter()
            .enumerate()
            .filter_map(|(offset, trade)| {
                self.project_one(first + offset, trade, timeline, series, window, mapping)
            })
            .collect::<Vec<_>>();

        markers.sort_by(|a, b| {
            OrderedFloat(a.pixel_x)
                .cmp(&OrderedFloat(b.pixel_x))
                .then_with(|| a.trade_index.cmp(&b.trade_index))
        });
        markers
    }

    fn project_one<M>(
        &self,
        trade_index: usize,
        trade: &Trade,
        timeline: &Timeline,
        series: &[f64],
        window: &ViewportWindow,
        mapping: &M,
    ) -> Option<MarkerPoint>
    where
        M: CoordinateMapping + ?Sized,
    {
        let sample_index = resolve_trade_index(trade_index, trade, timeline);
        if !window.contains_index(sample_index) {
            return None;
        }

        let value = match self.value_source {
            MarkerValueSource::TradePrice => trade.price,
            MarkerValueSource::SeriesValue => *series.get(sample_index)?,
        };
        if !value.is_finite() {
            return None;
        }

        let position = timeline.position(sample_index)?;
        let pixel_x = mapping.pixel_for_value(position)?;
        if !pixel_x.is_finite() {
            return None;
        }

        Some(MarkerPoint {
            trade_index,
            sample_index,
            position,
            value,
            pixel_x,
            side: trade.side,
            qty: trade.qty,
            realized_pnl: trade.realized_pnl,
        })
    }
}

/// Sample index a trade belongs to.
///
/// Timestamped timelines resolve the fill time; trades without a parseable
/// time (or on index timelines) use their ordinal in the trade list.
#[must_use]
pub fn resolve_trade_index(ordinal: usize, trade: &Trade, timeline: &Timeline) -> usize {
    let last = timeline.len().saturating_sub(1);
    match trade.timestamp_millis() {
        Some(millis) if timeline.is_timestamped() => timeline.resolve(millis),
        _ => ordinal.min(last),
    }
}

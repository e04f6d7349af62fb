use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{Timeline, Trade};
use crate::error::{ChartError, ChartResult};

use super::ChartKind;

/// One backtest result as consumed by the viewport.
///
/// Immutable for the lifetime of the result; loading a new feed resets the
/// window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BacktestFeed {
    /// Unix-millisecond sample times; `null` entries count as malformed.
    #[serde(default, deserialize_with = "nullable_numbers")]
    pub timestamps: Vec<f64>,
    #[serde(default, alias = "priceSeries")]
    pub price_series: Vec<f64>,
    #[serde(default, alias = "equityCurve")]
    pub equity_curve: Vec<f64>,
    #[serde(default, alias = "drawdownCurve")]
    pub drawdown_curve: Vec<f64>,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

/// Nested response shape of the backtest endpoint.
#[derive(Debug, Deserialize)]
struct BacktestResponse {
    #[serde(default, deserialize_with = "nullable_numbers")]
    timestamps: Vec<f64>,
    #[serde(default)]
    price_series: Vec<f64>,
    #[serde(default)]
    stats: BacktestStats,
    #[serde(default)]
    trades: Vec<Trade>,
}

#[derive(Debug, Default, Deserialize)]
struct BacktestStats {
    #[serde(default)]
    equity_curve: Vec<f64>,
    #[serde(default)]
    drawdown_curve: Vec<f64>,
}

impl From<BacktestResponse> for BacktestFeed {
    fn from(response: BacktestResponse) -> Self {
        Self {
            timestamps: response.timestamps,
            price_series: response.price_series,
            equity_curve: response.stats.equity_curve,
            drawdown_curve: response.stats.drawdown_curve,
            trades: response.trades,
        }
    }
}

impl BacktestFeed {
    /// Parses either the flat feed shape or the backend's nested response.
    ///
    /// Payloads carrying a `stats` object are read as the nested response.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse feed json: {e}")))?;
        let nested = value.get("stats").is_some_and(Value::is_object);

        let feed = if nested {
            let response: BacktestResponse = serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse backtest response: {e}"))
            })?;
            Self::from(response)
        } else {
            serde_json::from_value(value)
                .map_err(|e| ChartError::InvalidData(format!("failed to parse feed payload: {e}")))?
        };

        debug!(
            nested,
            samples = feed.sample_len(),
            trades = feed.trades.len(),
            "backtest feed parsed"
        );
        Ok(feed)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize feed: {e}")))
    }

    /// Number of samples on the x axis: the price series, or the equity
    /// curve when no prices were sent.
    #[must_use]
    pub fn sample_len(&self) -> usize {
        if self.price_series.is_empty() {
            self.equity_curve.len()
        } else {
            self.price_series.len()
        }
    }

    #[must_use]
    pub fn timeline(&self) -> Timeline {
        Timeline::new(&self.timestamps, self.sample_len())
    }

    /// The series a chart of `kind` plots.
    #[must_use]
    pub fn series_for(&self, kind: ChartKind) -> &[f64] {
        match kind {
            ChartKind::Price => &self.price_series,
            ChartKind::Equity => &self.equity_curve,
            ChartKind::Drawdown => &self.drawdown_curve,
        }
    }
}

fn nullable_numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

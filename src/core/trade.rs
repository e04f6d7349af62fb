use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64, parse_timestamp_text};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[serde(alias = "buy", alias = "Buy")]
    Buy,
    #[serde(alias = "sell", alias = "Sell")]
    Sell,
}

/// Raw trade time as delivered by the backtest backend.
///
/// Fills carry Unix milliseconds, but saved runs and manual simulations may
/// carry strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeTimestamp {
    Millis(f64),
    Text(String),
}

impl TradeTimestamp {
    /// Unix milliseconds, or `None` when the value is not parseable.
    #[must_use]
    pub fn to_millis(&self) -> Option<f64> {
        match self {
            Self::Millis(millis) => millis.is_finite().then_some(*millis),
            Self::Text(text) => parse_timestamp_text(text),
        }
    }
}

/// One executed fill from a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(default)]
    pub timestamp: Option<TradeTimestamp>,
    pub side: TradeSide,
    pub price: f64,
    pub qty: f64,
    #[serde(default, alias = "realizedPnl")]
    pub realized_pnl: Option<f64>,
    #[serde(default, alias = "orderId")]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub commission: Option<f64>,
    #[serde(default)]
    pub slippage: Option<f64>,
}

impl Trade {
    #[must_use]
    pub fn new(side: TradeSide, price: f64, qty: f64) -> Self {
        Self {
            timestamp: None,
            side,
            price,
            qty,
            realized_pnl: None,
            order_id: None,
            symbol: None,
            commission: None,
            slippage: None,
        }
    }

    /// Builds a trade from exact decimal fill values.
    pub fn from_decimal(
        time: DateTime<Utc>,
        side: TradeSide,
        price: Decimal,
        qty: Decimal,
    ) -> ChartResult<Self> {
        let price = decimal_to_f64(price, "price")?;
        let qty = decimal_to_f64(qty, "qty")?;
        if !price.is_finite() {
            return Err(ChartError::InvalidData("trade price must be finite".to_owned()));
        }
        Ok(Self::new(side, price, qty).at_millis(datetime_to_unix_millis(time)))
    }

    #[must_use]
    pub fn at_millis(mut self, millis: f64) -> Self {
        self.timestamp = Some(TradeTimestamp::Millis(millis));
        self
    }

    #[must_use]
    pub fn with_realized_pnl(mut self, pnl: f64) -> Self {
        self.realized_pnl = Some(pnl);
        self
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> Option<f64> {
        self.timestamp.as_ref().and_then(TradeTimestamp::to_millis)
    }
}

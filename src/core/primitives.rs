use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Parses the textual timestamp forms the backtest backend emits.
///
/// Accepts plain numbers (Unix ms), RFC 3339 instants and `YYYY-MM-DD` dates
/// (interpreted as UTC midnight).
#[must_use]
pub fn parse_timestamp_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(millis) = trimmed.parse::<f64>() {
        return millis.is_finite().then_some(millis);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime_to_unix_millis(instant.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(datetime_to_unix_millis(midnight.and_utc()))
}

//! Canonical OHLCV candles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::{first_decimal, lookup, parse_time, to_decimal};

/// Column positions of OHLCV values in array-shaped candle rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleLayout {
    pub time: usize,
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
    pub volume: usize,
}

impl CandleLayout {
    /// `[time, open, high, low, close, volume, ...]`.
    pub const OHLCV: CandleLayout = CandleLayout {
        time: 0,
        open: 1,
        high: 2,
        low: 3,
        close: 4,
        volume: 5,
    };

    fn width(&self) -> usize {
        [
            self.time,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// A single OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalCandle {
    #[serde(serialize_with = "super::serialize_time")]
    pub time: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume: Decimal,
}

impl CanonicalCandle {
    /// Serializes to `{time, open, high, low, close, volume}`.
    pub fn to_plain_object(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn from_array(row: &[Value], layout: &CandleLayout) -> Option<Self> {
        if row.len() < layout.width() {
            return None;
        }
        let value = |index: usize| to_decimal(&row[index]).unwrap_or(Decimal::ZERO);
        Some(Self {
            time: parse_time(&row[layout.time])?,
            open: value(layout.open),
            high: value(layout.high),
            low: value(layout.low),
            close: value(layout.close),
            volume: value(layout.volume),
        })
    }

    fn from_object(row: &Value) -> Option<Self> {
        let time = ["time", "start", "t", "ts", "timestamp", "Time"]
            .iter()
            .find_map(|key| lookup(row, key).and_then(parse_time))?;
        Some(Self {
            time,
            open: decimal_or_zero(row, &["open", "o", "Open"]),
            high: decimal_or_zero(row, &["high", "h", "High"]),
            low: decimal_or_zero(row, &["low", "l", "Low"]),
            close: decimal_or_zero(row, &["close", "c", "Close"]),
            volume: decimal_or_zero(row, &["volume", "v", "Volume"]),
        })
    }
}

fn decimal_or_zero(row: &Value, keys: &[&str]) -> Decimal {
    first_decimal(row, keys).unwrap_or(Decimal::ZERO)
}

fn candle_rows(raw: &Value) -> &[Value] {
    if let Value::Array(rows) = raw {
        return rows;
    }
    for path in ["data", "candles", "result.data"] {
        if let Some(Value::Array(rows)) = lookup(raw, path) {
            return rows;
        }
    }
    // Kraken nests rows under the pair name next to a `last` cursor.
    if let Some(Value::Object(result)) = lookup(raw, "result") {
        if let Some(Value::Array(rows)) = result.values().find(|value| value.is_array()) {
            return rows;
        }
    }
    &[]
}

/// Normalizes a raw candle response. Rows that are too short or carry
/// no readable time are skipped.
pub fn to_canonical_candles(raw: &Value, layout: &CandleLayout) -> Vec<CanonicalCandle> {
    candle_rows(raw)
        .iter()
        .filter_map(|row| match row {
            Value::Array(columns) => CanonicalCandle::from_array(columns, layout),
            Value::Object(_) => CanonicalCandle::from_object(row),
            _ => None,
        })
        .collect()
}

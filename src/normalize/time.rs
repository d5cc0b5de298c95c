//! Order timestamp resolution.
//!
//! Exchanges send epoch seconds, epoch milliseconds, fractional seconds or
//! ISO-8601 strings, usually without saying which. Numeric values are
//! disambiguated purely by magnitude.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use super::{lookup, to_decimal};

/// Epoch values at or above this are milliseconds, below it seconds.
pub const MILLIS_THRESHOLD: i64 = 99_999_999_999;

/// How a timestamp candidate should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    /// Decide seconds vs milliseconds by magnitude.
    Auto,
    /// Always epoch seconds.
    Seconds,
}

/// Candidate fields for [`order_time`], in priority order.
const TIME_CANDIDATES: &[(&str, Unit)] = &[
    ("info.updateTime", Unit::Auto),
    ("info.finish_time", Unit::Seconds),
    ("timestamp", Unit::Auto),
    ("transactTime", Unit::Auto),
    ("updateTime", Unit::Auto),
    ("time", Unit::Auto),
];

/// Returns `true` when an epoch value should be read as milliseconds.
pub fn is_millis(value: Decimal) -> bool {
    value >= Decimal::from(MILLIS_THRESHOLD)
}

/// Converts an epoch value of unknown unit into a UTC datetime.
pub fn epoch_to_datetime(value: Decimal) -> Option<DateTime<Utc>> {
    if is_millis(value) {
        DateTime::from_timestamp_millis(value.trunc().to_i64()?)
    } else {
        seconds_to_datetime(value)
    }
}

/// `None` when the value does not fit the millisecond range.
fn seconds_to_datetime(value: Decimal) -> Option<DateTime<Utc>> {
    let millis = value.checked_mul(Decimal::ONE_THOUSAND)?.trunc();
    DateTime::from_timestamp_millis(millis.to_i64()?)
}

/// Parses a single timestamp value: epoch number, numeric string or
/// ISO-8601 text.
pub fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    parse_with_unit(value, Unit::Auto)
}

fn parse_with_unit(value: &Value, unit: Unit) -> Option<DateTime<Utc>> {
    if let Some(number) = to_decimal(value) {
        if number <= Decimal::ZERO {
            return None;
        }
        return match unit {
            Unit::Auto => epoch_to_datetime(number),
            Unit::Seconds => seconds_to_datetime(number),
        };
    }
    let text = value.as_str()?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Resolves when an order was last updated.
///
/// Tries `info.updateTime`, `info.finish_time` (seconds), `timestamp`,
/// `transactTime`, `updateTime` and `time`, and falls back to the current
/// time when none is usable. `info.updateTime` is read with the magnitude
/// rule, so it covers both its second and millisecond forms.
pub fn order_time(raw: &Value) -> DateTime<Utc> {
    TIME_CANDIDATES
        .iter()
        .find_map(|(path, unit)| lookup(raw, path).and_then(|value| parse_with_unit(value, *unit)))
        .unwrap_or_else(Utc::now)
}

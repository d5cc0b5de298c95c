//! Tolerant field access over raw exchange JSON.
//!
//! Exchanges disagree on field names, nesting and even on whether a
//! number is sent as a JSON number or a string. Everything here accepts
//! `serde_json::Value` of any shape and answers `None` rather than
//! failing, so the factories built on top stay total.

pub mod derive;
pub mod time;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

pub use derive::{derive_average, derive_cost, derive_fee, derive_filled};
pub use time::{MILLIS_THRESHOLD, epoch_to_datetime, is_millis, order_time, parse_time};

/// Field paths probed, in order, for an order's raw status.
pub const STATUS_KEYS: &[&str] = &[
    "status",
    "state",
    "order_status",
    "orderStatus",
    "info.status",
    "info.state",
];

/// Resolves a dot-separated path such as `data.0.executedQty`.
///
/// Numeric segments index into arrays. JSON `null` counts as absent.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = raw;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() { None } else { Some(current) }
}

/// Converts a JSON number or numeric string into a [`Decimal`].
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .map(|value| value.normalize())
}

/// Decimal at `path`, if present and numeric.
pub fn decimal_at(raw: &Value, path: &str) -> Option<Decimal> {
    lookup(raw, path).and_then(to_decimal)
}

/// First numeric value found along `paths`.
pub fn first_decimal(raw: &Value, paths: &[&str]) -> Option<Decimal> {
    paths.iter().find_map(|path| decimal_at(raw, path))
}

/// First non-zero numeric value found along `paths`.
///
/// Used for the derivation chains where a zero means "the exchange did
/// not fill this field in" rather than a real zero.
pub fn first_nonzero(raw: &Value, paths: &[&str]) -> Option<Decimal> {
    paths
        .iter()
        .filter_map(|path| decimal_at(raw, path))
        .find(|value| !value.is_zero())
}

/// String at `path`; numbers are rendered, empty strings are absent.
pub fn string_at(raw: &Value, path: &str) -> Option<String> {
    match lookup(raw, path)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// First string found along `paths`.
pub fn first_string(raw: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| string_at(raw, path))
}

/// The raw, exchange-specific status string of an order response.
pub fn raw_status(raw: &Value) -> Option<String> {
    first_string(raw, STATUS_KEYS)
}

/// Pulls a human-readable failure message out of an exchange error body.
///
/// Looks at `data[0].sMsg` (OKX), `msg`, `message`, then `error` (string,
/// list of strings, or an object carrying its own message) and falls back
/// to the stringified response.
pub fn failure_message(raw: &Value) -> String {
    if let Value::String(text) = raw {
        return text.clone();
    }
    if let Some(message) = first_string(raw, &["data.0.sMsg", "msg", "message"]) {
        return message;
    }
    match lookup(raw, "error") {
        Some(Value::String(text)) if !text.is_empty() => return text.clone(),
        Some(Value::Array(items)) if !items.is_empty() => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            return joined;
        }
        Some(error @ Value::Object(_)) => {
            if let Some(message) = first_string(error, &["msg", "message"]) {
                return message;
            }
        }
        _ => {}
    }
    raw.to_string()
}

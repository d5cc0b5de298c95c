//! Canonical account balances.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::normalize::{first_decimal, first_string, lookup, to_decimal};

/// Containers probed, in order, for balance rows or asset maps.
const BALANCE_CONTAINERS: &[&str] = &[
    "balances",
    "data.0.details",
    "data.list",
    "data",
    "result.data",
    "result",
    "return.balance",
    "accounts",
];

/// Exchange-specific field names for one balance row.
#[derive(Debug, Clone, Copy)]
pub struct BalanceFields {
    pub asset: &'static [&'static str],
    pub free: &'static [&'static str],
    pub locked: &'static [&'static str],
    pub total: &'static [&'static str],
}

impl BalanceFields {
    pub const GENERIC: BalanceFields = BalanceFields {
        asset: &["asset", "currency", "ccy", "coin"],
        free: &["free", "available", "availBal"],
        locked: &["locked", "frozen", "hold", "holds", "frozenBal"],
        total: &["total", "balance", "eq"],
    };
}

/// Holdings of a single asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalBalance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub locked: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CanonicalBalance {
    /// Serializes to `{asset, free, locked, total}`.
    pub fn to_plain_object(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn from_row(row: &Value, fields: &BalanceFields) -> Option<Self> {
        let asset = first_string(row, fields.asset)?;
        let free = first_decimal(row, fields.free);
        let locked = first_decimal(row, fields.locked).unwrap_or(Decimal::ZERO);
        let total = first_decimal(row, fields.total);
        let (free, total) = match (free, total) {
            (Some(free), Some(total)) => (free, total),
            (Some(free), None) => (free, free.checked_add(locked).unwrap_or(Decimal::ZERO)),
            (None, Some(total)) => (
                total
                    .checked_sub(locked)
                    .unwrap_or(Decimal::ZERO)
                    .max(Decimal::ZERO),
                total,
            ),
            (None, None) => (Decimal::ZERO, locked),
        };
        Some(Self {
            asset: asset.to_uppercase(),
            free,
            locked,
            total,
        })
    }

    fn from_amount(asset: &str, amount: Decimal) -> Self {
        Self {
            asset: asset.to_uppercase(),
            free: amount,
            locked: Decimal::ZERO,
            total: amount,
        }
    }
}

fn from_rows(rows: &[Value], fields: &BalanceFields) -> Vec<CanonicalBalance> {
    rows.iter()
        .filter_map(|row| CanonicalBalance::from_row(row, fields))
        .collect()
}

/// Reads an `{ "XXBT": "0.5", "ZUSD": "100" }` style asset map.
fn from_asset_map(map: &serde_json::Map<String, Value>) -> Option<Vec<CanonicalBalance>> {
    let balances: Vec<CanonicalBalance> = map
        .iter()
        .filter_map(|(asset, amount)| {
            to_decimal(amount).map(|amount| CanonicalBalance::from_amount(asset, amount))
        })
        .collect();
    if balances.is_empty() { None } else { Some(balances) }
}

/// Normalizes a raw balance response.
///
/// Accepts a bare array of rows, rows nested under a known container,
/// or an asset → amount map. Rows without an asset are skipped.
pub fn to_canonical_balances(raw: &Value, fields: &BalanceFields) -> Vec<CanonicalBalance> {
    match raw {
        Value::Array(rows) => return from_rows(rows, fields),
        Value::Object(_) => {}
        _ => return Vec::new(),
    }
    for path in BALANCE_CONTAINERS {
        match lookup(raw, path) {
            Some(Value::Array(rows)) => return from_rows(rows, fields),
            Some(Value::Object(map)) => {
                if let Some(balances) = from_asset_map(map) {
                    return balances;
                }
            }
            _ => {}
        }
    }
    CanonicalBalance::from_row(raw, fields)
        .map(|balance| vec![balance])
        .unwrap_or_default()
}

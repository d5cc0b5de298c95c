//! Canonical trade (fill) records.
//!
//! Trade histories come back as arrays, as maps keyed by trade id, as a
//! single object, or as nothing at all. [`to_canonical_trades`] accepts
//! all of them and always returns at least one element so aggregation
//! code never has to special-case an empty history.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::normalize::{first_decimal, first_string, lookup};

/// Placeholder used for identifiers and currencies that are unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// Containers probed, in order, for the list of trades.
const TRADE_CONTAINERS: &[&str] = &[
    "data.items",
    "data.list",
    "data",
    "result.data",
    "result.trades",
    "result.list",
    "result",
    "trades",
    "fills",
];

/// Exchange-specific field names for one trade row.
#[derive(Debug, Clone, Copy)]
pub struct TradeFields {
    pub order_id: &'static [&'static str],
    /// Executed quantity in base currency.
    pub base_qty: &'static [&'static str],
    /// Executed notional in quote currency.
    pub quote_amount: &'static [&'static str],
    pub price: &'static [&'static str],
    pub fee_cost: &'static [&'static str],
    pub fee_currency: &'static [&'static str],
}

impl TradeFields {
    /// Field names common across most REST APIs.
    pub const GENERIC: TradeFields = TradeFields {
        order_id: &["orderId", "order_id", "trade_id"],
        base_qty: &["qty", "size", "amount", "baseVolume"],
        quote_amount: &["quoteQty", "cost", "funds"],
        price: &["price"],
        fee_cost: &["commission", "fee", "fees"],
        fee_currency: &["commissionAsset", "feeCurrency", "fee_currency"],
    };
}

/// Fee attached to a trade. `cost` is never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeFee {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

/// One normalized trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTrade {
    #[serde(rename = "order")]
    pub order_id: String,
    /// Executed notional in quote currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_qty: Decimal,
    pub fee: TradeFee,
    /// Set when a row could not be read as a trade.
    pub error: Option<String>,
}

impl Default for CanonicalTrade {
    fn default() -> Self {
        Self {
            order_id: NOT_AVAILABLE.to_string(),
            amount: Decimal::ZERO,
            base_qty: Decimal::ZERO,
            fee: TradeFee {
                currency: NOT_AVAILABLE.to_string(),
                cost: Decimal::ZERO,
            },
            error: None,
        }
    }
}

impl CanonicalTrade {
    /// Serializes to `{order, amount, baseQty, fee: {currency, cost}, error}`.
    pub fn to_plain_object(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn from_row(row: &Value, fields: &TradeFields) -> Self {
        if !row.is_object() {
            return Self {
                error: Some(format!("unrecognized trade entry: {row}")),
                ..Self::default()
            };
        }

        let order_id =
            first_string(row, fields.order_id).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let base_qty = first_decimal(row, fields.base_qty)
            .unwrap_or(Decimal::ZERO)
            .abs();
        let amount = first_decimal(row, fields.quote_amount)
            .or_else(|| {
                first_decimal(row, fields.price).and_then(|price| price.checked_mul(base_qty))
            })
            .unwrap_or(Decimal::ZERO)
            .abs();
        let (cost, nested_currency) = fee_from(row, fields.fee_cost);
        let currency = first_string(row, fields.fee_currency)
            .or(nested_currency)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            order_id,
            amount,
            base_qty,
            fee: TradeFee {
                currency,
                // Rebates arrive negative on some venues; only the magnitude is kept.
                cost: cost.abs(),
            },
            error: None,
        }
    }
}

/// Reads the fee, which may be a number, a `{cost|amount, currency}`
/// object, or a list of those. Returns the cost and any nested currency.
fn fee_from(row: &Value, paths: &[&str]) -> (Decimal, Option<String>) {
    for path in paths {
        match lookup(row, path) {
            Some(fee @ Value::Object(_)) => {
                let cost = first_decimal(fee, &["cost", "amount", "qty", "totalFee"]);
                if let Some(cost) = cost {
                    let currency = first_string(fee, &["currency", "asset", "feeCoin"]);
                    return (cost, currency);
                }
            }
            Some(Value::Array(items)) if !items.is_empty() => {
                let cost = items
                    .iter()
                    .filter_map(|item| first_decimal(item, &["cost", "amount", "qty", "fee"]))
                    .try_fold(Decimal::ZERO, |total, cost| total.checked_add(cost))
                    .unwrap_or(Decimal::ZERO);
                let currency = items
                    .first()
                    .and_then(|item| first_string(item, &["currency", "asset", "feeCoin"]));
                return (cost, currency);
            }
            Some(value) => {
                if let Some(cost) = crate::normalize::to_decimal(value) {
                    return (cost, None);
                }
            }
            None => {}
        }
    }
    (Decimal::ZERO, None)
}

/// Locates the trade rows inside a raw response.
fn trade_rows(raw: &Value) -> Vec<&Value> {
    match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        Value::Object(_) => {
            for path in TRADE_CONTAINERS {
                match lookup(raw, path) {
                    Some(Value::Array(items)) => return items.iter().collect(),
                    Some(Value::Object(map))
                        if !map.is_empty() && map.values().all(Value::is_object) =>
                    {
                        return map.values().collect();
                    }
                    _ => {}
                }
            }
            vec![raw]
        }
        _ => Vec::new(),
    }
}

/// Normalizes a raw trade history.
///
/// Never returns an empty list: empty or absent input yields one
/// default trade with zeroed quantities and `"N/A"` identifiers.
pub fn to_canonical_trades(raw: &Value, fields: &TradeFields) -> Vec<CanonicalTrade> {
    let trades: Vec<CanonicalTrade> = trade_rows(raw)
        .into_iter()
        .map(|row| CanonicalTrade::from_row(row, fields))
        .collect();

    if trades.is_empty() {
        debug!("no trades in response, using default trade");
        return vec![CanonicalTrade::default()];
    }
    trades
}

//! Normalized result of an order placement.
//!
//! Many exchanges answer a placement with little more than an order id.
//! The fill accessors therefore fall back to the same derivation chains
//! used for fetched orders, applied to the stored raw response, so a
//! placed order never silently reports zero execution when the response
//! did in fact carry fill data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::serialize_time;
use super::status::OrderStatus;
use crate::normalize::{derive_average, derive_cost, derive_filled};

/// Outcome of one place-order call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderResult {
    success: bool,
    msg: String,
    order_id: Option<String>,
    status: Option<OrderStatus>,
    time: DateTime<Utc>,
    err_code: Option<String>,
    api_response: Option<Value>,
    filled: Option<Decimal>,
    cost: Option<Decimal>,
    average: Option<Decimal>,
    symbol: Option<String>,
    price: Option<Decimal>,
    executed: Option<Decimal>,
}

/// Serialized view; never includes the raw response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlainPlaceOrder<'a> {
    success: bool,
    msg: &'a str,
    order_id: Option<&'a str>,
    status: Option<OrderStatus>,
    #[serde(serialize_with = "serialize_time")]
    time: DateTime<Utc>,
    err_code: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float")]
    filled: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    average: Decimal,
    symbol: Option<&'a str>,
    #[serde(with = "rust_decimal::serde::float_option")]
    price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    executed: Option<Decimal>,
}

impl PlaceOrderResult {
    /// Builds a successful placement result.
    pub fn succeeded(
        order_id: impl Into<String>,
        status: OrderStatus,
        time: DateTime<Utc>,
        raw_order: Value,
    ) -> Self {
        Self {
            success: true,
            msg: String::new(),
            order_id: Some(order_id.into()),
            status: Some(status),
            time,
            err_code: None,
            api_response: Some(raw_order),
            filled: None,
            cost: None,
            average: None,
            symbol: None,
            price: None,
            executed: None,
        }
    }

    /// Builds a `success = false` result. An empty message is replaced so
    /// that the message is always meaningful.
    pub fn failed(msg: impl Into<String>, raw_response: Option<Value>, err_code: Option<String>) -> Self {
        let msg = msg.into();
        Self {
            success: false,
            msg: if msg.is_empty() {
                "unknown error".to_string()
            } else {
                msg
            },
            order_id: None,
            status: None,
            time: Utc::now(),
            err_code,
            api_response: raw_response,
            filled: None,
            cost: None,
            average: None,
            symbol: None,
            price: None,
            executed: None,
        }
    }

    /// Records fill figures the exchange reported explicitly. These take
    /// precedence over anything derived from the raw response.
    #[must_use]
    pub fn with_fill(mut self, filled: Decimal, cost: Decimal, average: Decimal) -> Self {
        self.filled = Some(filled);
        self.cost = Some(cost);
        self.average = Some(average);
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_executed(mut self, executed: Decimal) -> Self {
        self.executed = Some(executed);
        self
    }

    /// Replaces the message, e.g. with one resolved after the fact.
    #[must_use]
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn err_code(&self) -> Option<&str> {
        self.err_code.as_deref()
    }

    /// The unmodified exchange response, if one was kept.
    pub fn api_response(&self) -> Option<&Value> {
        self.api_response.as_ref()
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn executed(&self) -> Option<Decimal> {
        self.executed
    }

    fn derivation_status(&self) -> OrderStatus {
        self.status.unwrap_or_default()
    }

    /// Average fill price: the explicit figure, else derived from the raw
    /// response on every call.
    pub fn average(&self) -> Decimal {
        self.average.unwrap_or_else(|| {
            self.api_response
                .as_ref()
                .map(|raw| derive_average(raw, self.derivation_status()))
                .unwrap_or(Decimal::ZERO)
        })
    }

    /// Executed base quantity: the explicit figure, else derived.
    pub fn filled(&self) -> Decimal {
        self.filled.unwrap_or_else(|| {
            self.api_response
                .as_ref()
                .map(|raw| derive_filled(raw, self.derivation_status()))
                .unwrap_or(Decimal::ZERO)
        })
    }

    /// Quote-currency notional: the explicit figure, else derived.
    pub fn cost(&self) -> Decimal {
        self.cost.unwrap_or_else(|| {
            self.api_response
                .as_ref()
                .map(derive_cost)
                .unwrap_or(Decimal::ZERO)
        })
    }

    /// Serializes the canonical fields with camelCase keys. The raw
    /// response is never included.
    pub fn to_plain_object(&self) -> Value {
        let plain = PlainPlaceOrder {
            success: self.success,
            msg: &self.msg,
            order_id: self.order_id(),
            status: self.status,
            time: self.time,
            err_code: self.err_code(),
            filled: self.filled(),
            cost: self.cost(),
            average: self.average(),
            symbol: self.symbol(),
            price: self.price,
            executed: self.executed,
        };
        serde_json::to_value(plain).unwrap_or(Value::Null)
    }
}

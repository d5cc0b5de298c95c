//! Normalized result of an order lookup.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::serialize_time;
use super::status::{OrderStatus, StatusVocabulary};
use crate::normalize::{derive_average, derive_cost, derive_fee, derive_filled, order_time, string_at};

/// Snapshot of one order as reported by one fetch-order response.
///
/// When `success` is `false` only [`failure_msg`](Self::failure_msg) is
/// meaningful; the numeric fields are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOrderResult {
    success: bool,
    status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    average: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    filled: Decimal,
    #[serde(serialize_with = "serialize_time")]
    time: DateTime<Utc>,
    note: String,
    failure_msg: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    executed: Decimal,
}

impl FetchOrderResult {
    /// Builds a successful result from a raw order response.
    ///
    /// Never fails: every field is derived independently and falls back
    /// to a default when the response does not carry it.
    pub fn from_response(raw: &Value, vocabulary: &StatusVocabulary) -> Self {
        let status = vocabulary.status_of(raw);
        let result = Self {
            success: true,
            status,
            cost: derive_cost(raw),
            average: derive_average(raw, status),
            fee: derive_fee(raw),
            filled: derive_filled(raw, status),
            time: order_time(raw),
            note: string_at(raw, "note").unwrap_or_default(),
            failure_msg: None,
            executed: Decimal::ZERO,
        };
        debug!(
            status = %result.status,
            filled = %result.filled,
            average = %result.average,
            "fetch-order response normalized"
        );
        result
    }

    /// Builds a `success = false` result for an error path.
    pub fn failed(failure_msg: impl Into<String>) -> Self {
        let failure_msg = failure_msg.into();
        Self {
            success: false,
            status: OrderStatus::Ongoing,
            cost: Decimal::ZERO,
            average: Decimal::ZERO,
            fee: Decimal::ZERO,
            filled: Decimal::ZERO,
            time: Utc::now(),
            note: String::new(),
            failure_msg: Some(if failure_msg.is_empty() {
                "unknown error".to_string()
            } else {
                failure_msg
            }),
            executed: Decimal::ZERO,
        }
    }

    /// Replaces the failure message.
    #[must_use]
    pub fn with_failure_msg(mut self, failure_msg: impl Into<String>) -> Self {
        self.failure_msg = Some(failure_msg.into());
        self
    }

    /// Records the executed amount reported by the caller.
    #[must_use]
    pub fn with_executed(mut self, executed: Decimal) -> Self {
        self.executed = executed;
        self
    }

    /// Attaches a free-form note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Notional in quote currency.
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    /// Average fill price; zero means unknown.
    pub fn average(&self) -> Decimal {
        self.average
    }

    pub fn fee(&self) -> Decimal {
        self.fee
    }

    /// Executed quantity in base currency.
    pub fn filled(&self) -> Decimal {
        self.filled
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn failure_msg(&self) -> Option<&str> {
        self.failure_msg.as_deref()
    }

    pub fn executed(&self) -> Decimal {
        self.executed
    }

    /// Serializes the canonical fields with camelCase keys.
    pub fn to_plain_object(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

//! Normalized result of an order cancellation.

use serde_json::{Value, json};

/// Outcome of one cancel-order call. Carries no derivation logic.
#[derive(Debug, Clone, PartialEq)]
pub struct CancelOrderResult {
    success: bool,
    msg: String,
    exchange_api_result: Value,
}

impl CancelOrderResult {
    pub fn new(success: bool, msg: impl Into<String>, exchange_api_result: Value) -> Self {
        Self {
            success,
            msg: msg.into(),
            exchange_api_result,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn exchange_api_result(&self) -> &Value {
        &self.exchange_api_result
    }

    /// Serializes to `{isSuccess, msg}`.
    pub fn to_plain_object(&self) -> Value {
        json!({
            "isSuccess": self.success,
            "msg": self.msg,
        })
    }
}

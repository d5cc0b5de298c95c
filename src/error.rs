//! Crate-level error types.
//!
//! Normalization itself never fails: every factory substitutes defaults
//! for missing or malformed fields. [`UnifexError`] only covers the edges
//! around it (configuration, JSON decoding, and exchange calls whose
//! result cannot be expressed as a `success = false` value object).

use serde_json::Value;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UnifexError>;

/// Top-level error type returned by all fallible public APIs.
#[derive(Debug, thiserror::Error)]
pub enum UnifexError {
    /// An environment variable held an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The exchange (or the HTTP layer in front of it) reported a failure.
    #[error("exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// An exchange name did not match any supported venue.
    #[error("unknown exchange: {0}")]
    UnknownExchange(String),
}

/// Failure reported by an [`ExchangeClient`](crate::venue::ExchangeClient).
///
/// The client classifies the HTTP response; when it decides the call
/// failed it hands back whatever body the exchange returned so the
/// factories can pull a readable message out of it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ExchangeError {
    pub message: String,
    pub code: Option<String>,
    pub response: Option<Value>,
}

impl ExchangeError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            response: None,
        }
    }

    /// Creates an error from a raw exchange body, extracting the message
    /// with [`failure_message`](crate::normalize::failure_message).
    pub fn from_response(response: Value, code: Option<String>) -> Self {
        Self {
            message: crate::normalize::failure_message(&response),
            code,
            response: Some(response),
        }
    }
}

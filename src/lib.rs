//! Unified normalization of cryptocurrency exchange REST responses.
//!
//! Translates each exchange's raw order, trade, balance and candle JSON
//! into one canonical representation: a four-state order status, derived
//! fill quantities and prices, and exchange-neutral value objects.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod venue;

pub use error::{ExchangeError, Result, UnifexError};

//! Canonical value objects produced from raw exchange responses.
//!
//! Every type here is built once from a single raw response and owned by
//! the caller. `to_plain_object()` renders the canonical fields only,
//! never the raw response or intermediate derivation values.

pub mod balance;
pub mod cancel_order;
pub mod candle;
pub mod exchange;
pub mod fetch_order;
pub mod order_request;
pub mod place_order;
pub mod status;
pub mod trade;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub use balance::{BalanceFields, CanonicalBalance, to_canonical_balances};
pub use cancel_order::CancelOrderResult;
pub use candle::{CandleLayout, CanonicalCandle, to_canonical_candles};
pub use exchange::{Exchange, ExchangeProfile};
pub use fetch_order::FetchOrderResult;
pub use order_request::{CandleRequest, OrderRequest, OrderSide, OrderType};
pub use place_order::PlaceOrderResult;
pub use status::{OrderStatus, StatusVocabulary, map_status};
pub use trade::{CanonicalTrade, TradeFee, TradeFields, to_canonical_trades};

/// Renders timestamps as ISO-8601 with millisecond precision.
pub(crate) fn serialize_time<S: Serializer>(
    time: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}

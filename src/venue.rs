//! Exchange client seam and the normalizing facade over it.
//!
//! An [`ExchangeClient`] owns everything exchange-specific about the
//! transport: URLs, signing, query building, and deciding whether a
//! response is a success. It hands back raw JSON. A [`Venue`] pairs a
//! client with its [`ExchangeProfile`] and turns that JSON into the
//! canonical value objects.

use std::future::Future;

use serde_json::Value;
use tracing::{Level, debug};

use crate::Result;
use crate::error::ExchangeError;
use crate::logging::{Category, record};
use crate::models::trade::NOT_AVAILABLE;
use crate::models::{
    CancelOrderResult, CandleRequest, CanonicalBalance, CanonicalCandle, CanonicalTrade, Exchange,
    ExchangeProfile, FetchOrderResult, OrderRequest, OrderStatus, PlaceOrderResult,
    to_canonical_balances, to_canonical_candles, to_canonical_trades,
};
use crate::normalize::{first_string, order_time, raw_status};

/// Raw response or classified failure from an exchange call.
pub type ClientResult = std::result::Result<Value, ExchangeError>;

/// Transport for one exchange's REST API.
///
/// Implementations return the unmodified response body on success and an
/// [`ExchangeError`] when the exchange or the HTTP layer reported failure.
pub trait ExchangeClient {
    fn fetch_balance(&self) -> impl Future<Output = ClientResult> + Send;

    fn place_order(&self, order: &OrderRequest) -> impl Future<Output = ClientResult> + Send;

    fn cancel_order(
        &self,
        order_id: &str,
        symbol: &str,
    ) -> impl Future<Output = ClientResult> + Send;

    fn fetch_order(&self, order_id: &str, symbol: &str)
    -> impl Future<Output = ClientResult> + Send;

    fn load_trades(&self, order_id: &str, symbol: &str)
    -> impl Future<Output = ClientResult> + Send;

    fn fetch_candles(
        &self,
        request: &CandleRequest,
    ) -> impl Future<Output = ClientResult> + Send;
}

/// A client bound to the normalization profile of its exchange.
#[derive(Debug)]
pub struct Venue<C> {
    client: C,
    profile: &'static ExchangeProfile,
}

impl<C: ExchangeClient> Venue<C> {
    /// Binds `client` to the built-in profile of `exchange`.
    pub fn new(exchange: Exchange, client: C) -> Self {
        Self::with_profile(exchange.profile(), client)
    }

    /// Binds `client` to an explicit profile.
    pub fn with_profile(profile: &'static ExchangeProfile, client: C) -> Self {
        record(
            Category::Exchange,
            Level::DEBUG,
            &format!("venue bound to {}", profile.exchange),
        );
        Self { client, profile }
    }

    pub fn exchange(&self) -> Exchange {
        self.profile.exchange
    }

    pub fn profile(&self) -> &'static ExchangeProfile {
        self.profile
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn log_failure(&self, category: Category, operation: &str, err: &ExchangeError) {
        record(
            category,
            Level::WARN,
            &format!("{} {operation} failed: {err}", self.exchange()),
        );
    }

    /// Fetches one order and normalizes it.
    pub async fn fetch_order(&self, order_id: &str, symbol: &str) -> FetchOrderResult {
        match self.client.fetch_order(order_id, symbol).await {
            Ok(raw) => FetchOrderResult::from_response(&raw, &self.profile.statuses),
            Err(err) => {
                self.log_failure(Category::Order, "fetch_order", &err);
                FetchOrderResult::failed(err.message)
            }
        }
    }

    /// Places an order and normalizes the acknowledgement.
    pub async fn place_order(&self, order: &OrderRequest) -> PlaceOrderResult {
        let raw = match self.client.place_order(order).await {
            Ok(raw) => raw,
            Err(err) => {
                self.log_failure(Category::Order, "place_order", &err);
                return PlaceOrderResult::failed(err.message, err.response, err.code);
            }
        };

        let order_id = first_string(&raw, self.profile.order_id_fields).unwrap_or_else(|| {
            record(
                Category::Order,
                Level::WARN,
                &format!("{} place_order response carries no order id", self.exchange()),
            );
            NOT_AVAILABLE.to_string()
        });
        let status = raw_status(&raw)
            .map(|status| self.profile.statuses.map_status(&status))
            .unwrap_or(OrderStatus::Ongoing);
        let time = order_time(&raw);
        debug!(exchange = %self.exchange(), %order_id, %status, "order placed");

        let result = PlaceOrderResult::succeeded(order_id, status, time, raw)
            .with_symbol(order.symbol.as_str());
        match order.price() {
            Some(price) => result.with_price(price),
            None => result,
        }
    }

    /// Cancels an order.
    pub async fn cancel_order(&self, order_id: &str, symbol: &str) -> CancelOrderResult {
        match self.client.cancel_order(order_id, symbol).await {
            Ok(raw) => CancelOrderResult::new(true, format!("order {order_id} cancelled"), raw),
            Err(err) => {
                self.log_failure(Category::Order, "cancel_order", &err);
                CancelOrderResult::new(false, err.message, err.response.unwrap_or(Value::Null))
            }
        }
    }

    /// Loads the fills of one order. Never empty: a failed call yields a
    /// single default trade carrying the error message.
    pub async fn load_trades(&self, order_id: &str, symbol: &str) -> Vec<CanonicalTrade> {
        match self.client.load_trades(order_id, symbol).await {
            Ok(raw) => to_canonical_trades(&raw, &self.profile.trade_fields),
            Err(err) => {
                self.log_failure(Category::Trade, "load_trades", &err);
                vec![CanonicalTrade {
                    error: Some(err.message),
                    ..CanonicalTrade::default()
                }]
            }
        }
    }

    /// Fetches account balances.
    ///
    /// # Errors
    ///
    /// Returns [`UnifexError::Exchange`](crate::UnifexError::Exchange) when
    /// the client reports failure.
    pub async fn fetch_balance(&self) -> Result<Vec<CanonicalBalance>> {
        let raw = self.client.fetch_balance().await.inspect_err(|err| {
            self.log_failure(Category::Balance, "fetch_balance", err);
        })?;
        Ok(to_canonical_balances(&raw, &self.profile.balance_fields))
    }

    /// Fetches a candle history.
    ///
    /// # Errors
    ///
    /// Returns [`UnifexError::Exchange`](crate::UnifexError::Exchange) when
    /// the client reports failure.
    pub async fn fetch_candles(&self, request: &CandleRequest) -> Result<Vec<CanonicalCandle>> {
        let raw = self.client.fetch_candles(request).await.inspect_err(|err| {
            self.log_failure(Category::Candle, "fetch_candles", err);
        })?;
        Ok(to_canonical_candles(&raw, &self.profile.candle_layout))
    }
}

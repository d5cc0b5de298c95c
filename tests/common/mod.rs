//! Shared test utilities: fixture parsing and a scripted exchange client.

#![allow(dead_code)]

use serde_json::Value;
use unifex::ExchangeError;
use unifex::models::{CandleRequest, OrderRequest};
use unifex::venue::{ClientResult, ExchangeClient};

/// Parses a JSON fixture.
pub fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("Failed to parse fixture")
}

/// Client that answers every call with a canned result.
///
/// Calls that were not scripted fail with `"not scripted"`.
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    pub balance: ClientResult,
    pub place: ClientResult,
    pub cancel: ClientResult,
    pub order: ClientResult,
    pub trades: ClientResult,
    pub candles: ClientResult,
}

impl Default for ScriptedClient {
    fn default() -> Self {
        let unscripted = Err(ExchangeError::new("not scripted"));
        Self {
            balance: unscripted.clone(),
            place: unscripted.clone(),
            cancel: unscripted.clone(),
            order: unscripted.clone(),
            trades: unscripted.clone(),
            candles: unscripted,
        }
    }
}

impl ExchangeClient for ScriptedClient {
    async fn fetch_balance(&self) -> ClientResult {
        self.balance.clone()
    }

    async fn place_order(&self, _order: &OrderRequest) -> ClientResult {
        self.place.clone()
    }

    async fn cancel_order(&self, _order_id: &str, _symbol: &str) -> ClientResult {
        self.cancel.clone()
    }

    async fn fetch_order(&self, _order_id: &str, _symbol: &str) -> ClientResult {
        self.order.clone()
    }

    async fn load_trades(&self, _order_id: &str, _symbol: &str) -> ClientResult {
        self.trades.clone()
    }

    async fn fetch_candles(&self, _request: &CandleRequest) -> ClientResult {
        self.candles.clone()
    }
}

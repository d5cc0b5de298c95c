//! Requests handed to an exchange client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// How the order should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum OrderType {
    Market,
    Limit { price: Decimal },
}

/// An order to place on an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Unified symbol, e.g. `"BTC/USDT"`.
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Quantity in base currency.
    pub amount: Decimal,
}

impl OrderRequest {
    /// Creates a market order.
    #[must_use]
    pub fn market(side: OrderSide, symbol: &str, amount: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Market,
            amount,
        }
    }

    /// Creates a limit order.
    #[must_use]
    pub fn limit(side: OrderSide, symbol: &str, amount: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Limit { price },
            amount,
        }
    }

    /// Limit price, if any.
    pub fn price(&self) -> Option<Decimal> {
        match self.order_type {
            OrderType::Market => None,
            OrderType::Limit { price } => Some(price),
        }
    }
}

/// A candle history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleRequest {
    pub symbol: String,
    /// Interval in exchange-neutral form (`"1m"`, `"1h"`, `"1d"`).
    pub interval: String,
    /// Inclusive start, epoch milliseconds.
    pub start_time: Option<i64>,
    /// Exclusive end, epoch milliseconds.
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

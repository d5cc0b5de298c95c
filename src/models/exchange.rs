//! Supported exchanges and their normalization profiles.
//!
//! Everything that differs between venues at the normalization level is
//! data: a status table, trade and balance field names, and the column
//! layout of candle rows. Adding a venue means adding a profile here.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::balance::BalanceFields;
use super::candle::CandleLayout;
use super::status::OrderStatus::{Cancelled, Filled, Ongoing, PartialFilled};
use super::status::{OrderStatus, StatusVocabulary};
use super::trade::TradeFields;
use crate::error::UnifexError;

/// A supported exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Okx,
    Kraken,
    Bitget,
    Coinbase,
    Gate,
    Kucoin,
    Mexc,
    Indodax,
    #[serde(rename = "crypto.com")]
    CryptoCom,
    Tokocrypto,
    Bitfinex,
}

impl Exchange {
    pub const ALL: [Exchange; 12] = [
        Exchange::Binance,
        Exchange::Okx,
        Exchange::Kraken,
        Exchange::Bitget,
        Exchange::Coinbase,
        Exchange::Gate,
        Exchange::Kucoin,
        Exchange::Mexc,
        Exchange::Indodax,
        Exchange::CryptoCom,
        Exchange::Tokocrypto,
        Exchange::Bitfinex,
    ];

    /// Returns the lowercase name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Binance => "binance",
            Exchange::Okx => "okx",
            Exchange::Kraken => "kraken",
            Exchange::Bitget => "bitget",
            Exchange::Coinbase => "coinbase",
            Exchange::Gate => "gate",
            Exchange::Kucoin => "kucoin",
            Exchange::Mexc => "mexc",
            Exchange::Indodax => "indodax",
            Exchange::CryptoCom => "crypto.com",
            Exchange::Tokocrypto => "tokocrypto",
            Exchange::Bitfinex => "bitfinex",
        }
    }

    /// Returns the normalization profile for this exchange.
    pub fn profile(&self) -> &'static ExchangeProfile {
        match self {
            Exchange::Binance => &BINANCE,
            Exchange::Okx => &OKX,
            Exchange::Kraken => &KRAKEN,
            Exchange::Bitget => &BITGET,
            Exchange::Coinbase => &COINBASE,
            Exchange::Gate => &GATE,
            Exchange::Kucoin => &KUCOIN,
            Exchange::Mexc => &MEXC,
            Exchange::Indodax => &INDODAX,
            Exchange::CryptoCom => &CRYPTO_COM,
            Exchange::Tokocrypto => &TOKOCRYPTO,
            Exchange::Bitfinex => &BITFINEX,
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = UnifexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "cryptocom" | "crypto_com" => return Ok(Exchange::CryptoCom),
            "gateio" | "gate.io" => return Ok(Exchange::Gate),
            _ => {}
        }
        Exchange::ALL
            .into_iter()
            .find(|exchange| exchange.as_str() == name)
            .ok_or_else(|| UnifexError::UnknownExchange(s.to_string()))
    }
}

/// Per-exchange normalization data.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeProfile {
    pub exchange: Exchange,
    pub statuses: StatusVocabulary,
    pub trade_fields: TradeFields,
    pub balance_fields: BalanceFields,
    pub candle_layout: CandleLayout,
    /// Where a place-order response carries the new order's id.
    pub order_id_fields: &'static [&'static str],
}

// Binance, MEXC and TokoCrypto share one REST dialect.
const BINANCE_STATUSES: &[(&str, OrderStatus)] = &[
    ("new", Ongoing),
    ("pending_new", Ongoing),
    ("pending_cancel", Ongoing),
    ("partially_filled", PartialFilled),
    ("filled", Filled),
    ("canceled", Cancelled),
    ("rejected", Cancelled),
    ("expired", Cancelled),
    ("expired_in_match", Cancelled),
];

const BINANCE_TRADES: TradeFields = TradeFields {
    order_id: &["orderId"],
    base_qty: &["qty"],
    quote_amount: &["quoteQty"],
    price: &["price"],
    fee_cost: &["commission"],
    fee_currency: &["commissionAsset"],
};

const BINANCE_BALANCES: BalanceFields = BalanceFields {
    asset: &["asset"],
    free: &["free"],
    locked: &["locked"],
    total: &[],
};

const BINANCE_ORDER_IDS: &[&str] = &["orderId", "data.orderId"];

pub static BINANCE: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Binance,
    statuses: StatusVocabulary::new(BINANCE_STATUSES),
    trade_fields: BINANCE_TRADES,
    balance_fields: BINANCE_BALANCES,
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: BINANCE_ORDER_IDS,
};

pub static MEXC: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Mexc,
    statuses: StatusVocabulary::new(&[
        ("new", Ongoing),
        ("partially_filled", PartialFilled),
        ("filled", Filled),
        ("canceled", Cancelled),
        ("partially_canceled", Cancelled),
    ]),
    trade_fields: BINANCE_TRADES,
    balance_fields: BINANCE_BALANCES,
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: BINANCE_ORDER_IDS,
};

pub static TOKOCRYPTO: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Tokocrypto,
    // Numeric codes on the open API, words on the Binance-compatible one.
    statuses: StatusVocabulary::new(&[
        ("0", Ongoing),
        ("1", PartialFilled),
        ("2", Filled),
        ("3", Cancelled),
        ("4", Ongoing),
        ("5", Cancelled),
        ("6", Cancelled),
        ("new", Ongoing),
        ("partially_filled", PartialFilled),
        ("filled", Filled),
        ("canceled", Cancelled),
        ("rejected", Cancelled),
        ("expired", Cancelled),
    ]),
    trade_fields: BINANCE_TRADES,
    balance_fields: BINANCE_BALANCES,
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["data.orderId", "orderId"],
};

pub static OKX: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Okx,
    statuses: StatusVocabulary::new(&[
        ("live", Ongoing),
        ("partially_filled", PartialFilled),
        ("filled", Filled),
        ("canceled", Cancelled),
        ("mmp_canceled", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["ordId"],
        base_qty: &["fillSz"],
        quote_amount: &[],
        price: &["fillPx"],
        fee_cost: &["fee"],
        fee_currency: &["feeCcy"],
    },
    balance_fields: BalanceFields {
        asset: &["ccy"],
        free: &["availBal"],
        locked: &["frozenBal"],
        total: &["eq", "cashBal"],
    },
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["data.0.ordId", "ordId"],
};

pub static KRAKEN: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Kraken,
    statuses: StatusVocabulary::new(&[
        ("pending", Ongoing),
        ("open", Ongoing),
        ("closed", Filled),
        ("canceled", Cancelled),
        ("expired", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["ordertxid"],
        base_qty: &["vol"],
        quote_amount: &["cost"],
        price: &["price"],
        fee_cost: &["fee"],
        fee_currency: &[],
    },
    balance_fields: BalanceFields::GENERIC,
    candle_layout: CandleLayout {
        time: 0,
        open: 1,
        high: 2,
        low: 3,
        close: 4,
        volume: 6,
    },
    order_id_fields: &["result.txid.0", "txid.0", "txid"],
};

pub static BITGET: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Bitget,
    statuses: StatusVocabulary::new(&[
        ("init", Ongoing),
        ("new", Ongoing),
        ("live", Ongoing),
        ("partially_filled", PartialFilled),
        ("partial_fill", PartialFilled),
        ("filled", Filled),
        ("full_fill", Filled),
        ("cancelled", Cancelled),
        ("canceled", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["orderId"],
        base_qty: &["size"],
        quote_amount: &["amount"],
        price: &["priceAvg"],
        fee_cost: &["feeDetail.totalFee", "fee"],
        fee_currency: &["feeDetail.feeCoin", "feeCcy"],
    },
    balance_fields: BalanceFields {
        asset: &["coin", "coinName"],
        free: &["available"],
        locked: &["frozen", "locked"],
        total: &[],
    },
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["data.orderId", "orderId"],
};

pub static COINBASE: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Coinbase,
    statuses: StatusVocabulary::new(&[
        ("pending", Ongoing),
        ("open", Ongoing),
        ("queued", Ongoing),
        ("cancel_queued", Ongoing),
        ("filled", Filled),
        ("cancelled", Cancelled),
        ("expired", Cancelled),
        ("failed", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["order_id"],
        base_qty: &["size"],
        quote_amount: &[],
        price: &["price"],
        fee_cost: &["commission"],
        fee_currency: &[],
    },
    balance_fields: BalanceFields {
        asset: &["currency"],
        free: &["available_balance.value"],
        locked: &["hold.value"],
        total: &[],
    },
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["success_response.order_id", "order_id"],
};

pub static GATE: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Gate,
    statuses: StatusVocabulary::new(&[
        ("open", Ongoing),
        ("closed", Filled),
        ("cancelled", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["order_id"],
        base_qty: &["amount"],
        quote_amount: &[],
        price: &["price"],
        fee_cost: &["fee"],
        fee_currency: &["fee_currency"],
    },
    balance_fields: BalanceFields {
        asset: &["currency"],
        free: &["available"],
        locked: &["locked"],
        total: &[],
    },
    // [t, quote volume, close, high, low, open, base volume]
    candle_layout: CandleLayout {
        time: 0,
        open: 5,
        high: 3,
        low: 4,
        close: 2,
        volume: 6,
    },
    order_id_fields: &["id"],
};

pub static KUCOIN: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Kucoin,
    statuses: StatusVocabulary::new(&[
        ("open", Ongoing),
        ("active", Ongoing),
        ("match", PartialFilled),
        ("done", Filled),
        ("cancelled", Cancelled),
        ("canceled", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["orderId"],
        base_qty: &["size"],
        quote_amount: &["funds"],
        price: &["price"],
        fee_cost: &["fee"],
        fee_currency: &["feeCurrency"],
    },
    balance_fields: BalanceFields {
        asset: &["currency"],
        free: &["available"],
        locked: &["holds"],
        total: &["balance"],
    },
    // [time, open, close, high, low, volume, turnover]
    candle_layout: CandleLayout {
        time: 0,
        open: 1,
        high: 3,
        low: 4,
        close: 2,
        volume: 5,
    },
    order_id_fields: &["data.orderId", "orderId"],
};

pub static INDODAX: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Indodax,
    statuses: StatusVocabulary::new(&[
        ("open", Ongoing),
        ("filled", Filled),
        ("cancelled", Cancelled),
        ("canceled", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["order_id", "trade_id"],
        base_qty: &["qty", "amount"],
        quote_amount: &["total"],
        price: &["price"],
        fee_cost: &["fee"],
        fee_currency: &["fee_currency"],
    },
    balance_fields: BalanceFields::GENERIC,
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["return.order_id", "order_id"],
};

pub static CRYPTO_COM: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::CryptoCom,
    statuses: StatusVocabulary::new(&[
        ("new", Ongoing),
        ("pending", Ongoing),
        ("active", Ongoing),
        ("filled", Filled),
        ("canceled", Cancelled),
        ("rejected", Cancelled),
        ("expired", Cancelled),
    ]),
    trade_fields: TradeFields {
        order_id: &["order_id"],
        base_qty: &["traded_quantity"],
        quote_amount: &[],
        price: &["traded_price"],
        fee_cost: &["fees"],
        fee_currency: &["fee_instrument_name"],
    },
    balance_fields: BalanceFields {
        asset: &["instrument_name", "currency"],
        free: &["max_withdrawal_balance", "available"],
        locked: &["reserved_qty", "order"],
        total: &["quantity", "balance"],
    },
    candle_layout: CandleLayout::OHLCV,
    order_id_fields: &["result.order_id", "order_id"],
};

pub static BITFINEX: ExchangeProfile = ExchangeProfile {
    exchange: Exchange::Bitfinex,
    statuses: StatusVocabulary::new(&[
        ("active", Ongoing),
        ("partially filled", PartialFilled),
        ("executed", Filled),
        ("canceled", Cancelled),
        ("insufficient margin", Cancelled),
    ]),
    trade_fields: TradeFields::GENERIC,
    balance_fields: BalanceFields::GENERIC,
    candle_layout: CandleLayout {
        time: 0,
        open: 1,
        high: 3,
        low: 4,
        close: 2,
        volume: 5,
    },
    order_id_fields: &["id", "4.0.0"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("binance".parse::<Exchange>().unwrap(), Exchange::Binance);
        assert_eq!(" OKX ".parse::<Exchange>().unwrap(), Exchange::Okx);
        assert_eq!("crypto.com".parse::<Exchange>().unwrap(), Exchange::CryptoCom);
        assert_eq!("cryptocom".parse::<Exchange>().unwrap(), Exchange::CryptoCom);
        assert_eq!("gate.io".parse::<Exchange>().unwrap(), Exchange::Gate);
        assert!(matches!(
            "bybit".parse::<Exchange>(),
            Err(UnifexError::UnknownExchange(name)) if name == "bybit"
        ));
    }

    #[test]
    fn every_profile_belongs_to_its_exchange() {
        for exchange in Exchange::ALL {
            assert_eq!(exchange.profile().exchange, exchange);
            assert_eq!(exchange.as_str().parse::<Exchange>().unwrap(), exchange);
        }
    }

    #[test]
    fn every_profile_maps_open_filled_and_cancelled() {
        for exchange in Exchange::ALL {
            let statuses = exchange.profile().statuses;
            for status in [Ongoing, Filled, Cancelled] {
                assert!(
                    statuses.names_for(status).next().is_some(),
                    "{exchange} has no raw status for {status}"
                );
            }
        }
    }

    #[test]
    fn vocabularies_differ_per_exchange() {
        assert_eq!(KRAKEN.statuses.map_status("closed"), Filled);
        assert_eq!(GATE.statuses.map_status("closed"), Filled);
        assert_eq!(OKX.statuses.map_status("closed"), Ongoing);
        assert_eq!(TOKOCRYPTO.statuses.map_status("2"), Filled);
        assert_eq!(KUCOIN.statuses.map_status("done"), Filled);
        assert_eq!(BITFINEX.statuses.map_status("EXECUTED @ 107.6(-0.2)"), Filled);
        assert_eq!(BITFINEX.statuses.map_status("PARTIALLY FILLED @ 107.6(-0.2)"), PartialFilled);
    }

    #[test]
    fn serde_uses_config_names() {
        let exchange: Exchange = serde_json::from_str("\"crypto.com\"").unwrap();
        assert_eq!(exchange, Exchange::CryptoCom);
        assert_eq!(serde_json::to_string(&Exchange::Kucoin).unwrap(), "\"kucoin\"");
    }
}

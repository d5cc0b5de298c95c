//! Normalization of recorded exchange responses.

mod common;

use chrono::{SecondsFormat, Utc};
use rust_decimal_macros::dec;
use unifex::models::exchange::{BINANCE, CRYPTO_COM, GATE, KRAKEN, KUCOIN, OKX, TOKOCRYPTO};
use unifex::models::{
    FetchOrderResult, OrderStatus, to_canonical_balances, to_canonical_candles,
    to_canonical_trades,
};
use unifex::normalize::failure_message;

use common::parse;

const BINANCE_ORDER_FILLED_JSON: &str = include_str!("fixtures/binance_order_filled.json");
const KRAKEN_ORDER_CLOSED_JSON: &str = include_str!("fixtures/kraken_order_closed.json");
const GATE_ORDER_CLOSED_JSON: &str = include_str!("fixtures/gate_order_closed.json");
const TOKOCRYPTO_ORDER_JSON: &str = include_str!("fixtures/tokocrypto_order.json");
const OKX_ORDER_LIVE_JSON: &str = include_str!("fixtures/okx_order_live.json");
const OKX_PLACE_ERROR_JSON: &str = include_str!("fixtures/okx_place_error.json");
const BINANCE_TRADES_JSON: &str = include_str!("fixtures/binance_trades.json");
const KUCOIN_FILLS_JSON: &str = include_str!("fixtures/kucoin_fills.json");
const CRYPTOCOM_TRADES_JSON: &str = include_str!("fixtures/cryptocom_trades.json");
const OKX_BALANCE_JSON: &str = include_str!("fixtures/okx_balance.json");
const KRAKEN_BALANCE_JSON: &str = include_str!("fixtures/kraken_balance.json");
const GATE_CANDLES_JSON: &str = include_str!("fixtures/gate_candles.json");
const KRAKEN_OHLC_JSON: &str = include_str!("fixtures/kraken_ohlc.json");
const OVERSIZED_ORDER_JSON: &str = include_str!("fixtures/oversized_order.json");
const OVERSIZED_FILLS_JSON: &str = include_str!("fixtures/oversized_fills.json");
const OVERSIZED_BALANCE_JSON: &str = include_str!("fixtures/oversized_balance.json");

fn iso(result: &FetchOrderResult) -> String {
    result.time().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[test]
fn test_binance_filled_order_derives_average_from_cumulative_quote() {
    let result = FetchOrderResult::from_response(&parse(BINANCE_ORDER_FILLED_JSON), &BINANCE.statuses);

    assert!(result.success());
    assert_eq!(result.status(), OrderStatus::Filled);
    assert_eq!(result.filled(), dec!(0.002));
    assert_eq!(result.cost(), dec!(84.3));
    assert_eq!(result.average(), dec!(42150));
    assert_eq!(result.fee(), dec!(0));
    assert_eq!(iso(&result), "2023-11-14T22:13:21.500Z");
}

#[test]
fn test_kraken_closed_order_recomputes_filled() {
    let result = FetchOrderResult::from_response(&parse(KRAKEN_ORDER_CLOSED_JSON), &KRAKEN.statuses);

    assert_eq!(result.status(), OrderStatus::Filled);
    assert_eq!(result.filled(), dec!(2));
    assert_eq!(result.fee(), dec!(0.26));
    assert_eq!(iso(&result), "2023-11-14T22:13:20.000Z");
}

#[test]
fn test_gate_closed_order_falls_back_to_amount() {
    let result = FetchOrderResult::from_response(&parse(GATE_ORDER_CLOSED_JSON), &GATE.statuses);

    assert_eq!(result.status(), OrderStatus::Filled);
    assert_eq!(result.average(), dec!(0));
    assert_eq!(result.filled(), dec!(0.75));
    assert_eq!(result.cost(), dec!(250));
    assert_eq!(iso(&result), "2023-11-14T22:13:20.000Z");
}

#[test]
fn test_tokocrypto_numeric_status_and_nested_quantity() {
    let result =
        FetchOrderResult::from_response(&parse(TOKOCRYPTO_ORDER_JSON), &TOKOCRYPTO.statuses);

    assert_eq!(result.status(), OrderStatus::PartialFilled);
    assert_eq!(result.filled(), dec!(0.0005));
    assert_eq!(iso(&result), "2023-11-14T22:13:20.123Z");
}

#[test]
fn test_okx_live_order_has_no_average() {
    let result = FetchOrderResult::from_response(&parse(OKX_ORDER_LIVE_JSON), &OKX.statuses);

    assert_eq!(result.status(), OrderStatus::Ongoing);
    assert_eq!(result.average(), dec!(0));
    assert_eq!(result.filled(), dec!(0));
    assert_eq!(iso(&result), "2023-11-14T22:13:20.000Z");
}

#[test]
fn test_okx_error_message_extracted() {
    let message = failure_message(&parse(OKX_PLACE_ERROR_JSON));
    assert_eq!(message, "Order failed. Insufficient USDT balance in account.");

    let result = FetchOrderResult::failed(message);
    assert!(!result.success());
    assert!(result.failure_msg().unwrap().contains("Insufficient USDT"));
}

#[test]
fn test_binance_trades_normalize() {
    let trades = to_canonical_trades(&parse(BINANCE_TRADES_JSON), &BINANCE.trade_fields);

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].order_id, "100234");
    assert_eq!(trades[0].base_qty, dec!(12));
    assert_eq!(trades[0].amount, dec!(48.000012));
    assert_eq!(trades[0].fee.currency, "BNB");
    assert_eq!(trades[0].fee.cost, dec!(10.1));
    assert_eq!(trades[1].base_qty, dec!(3));
    assert!(trades.iter().all(|trade| trade.error.is_none()));
}

#[test]
fn test_kucoin_paginated_fills_normalize() {
    let trades = to_canonical_trades(&parse(KUCOIN_FILLS_JSON), &KUCOIN.trade_fields);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].order_id, "5c35c02703aa673ceec2a168");
    assert_eq!(trades[0].base_qty, dec!(0.01));
    assert_eq!(trades[0].amount, dec!(420));
    assert_eq!(trades[0].fee.cost, dec!(0.42));
    assert_eq!(trades[0].fee.currency, "USDT");
}

#[test]
fn test_cryptocom_rebate_fee_is_absolute() {
    let trades = to_canonical_trades(&parse(CRYPTOCOM_TRADES_JSON), &CRYPTO_COM.trade_fields);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].order_id, "19848525");
    assert_eq!(trades[0].amount, dec!(1000));
    assert_eq!(trades[0].fee.cost, dec!(0.25));
    assert_eq!(trades[0].fee.currency, "USD");
}

#[test]
fn test_okx_balances_normalize() {
    let balances = to_canonical_balances(&parse(OKX_BALANCE_JSON), &OKX.balance_fields);

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].asset, "USDT");
    assert_eq!(balances[0].free, dec!(4834.317093622894));
    assert_eq!(balances[1].asset, "BTC");
    assert_eq!(balances[1].free, dec!(1.2));
    assert_eq!(balances[1].locked, dec!(0.3));
    assert_eq!(balances[1].total, dec!(1.5));
}

#[test]
fn test_kraken_balance_map_normalizes() {
    let balances = to_canonical_balances(&parse(KRAKEN_BALANCE_JSON), &KRAKEN.balance_fields);

    assert_eq!(balances.len(), 3);
    let usd = balances
        .iter()
        .find(|balance| balance.asset == "ZUSD")
        .expect("ZUSD balance");
    assert_eq!(usd.free, dec!(171288.6158));
    assert_eq!(usd.locked, dec!(0));
}

#[test]
fn test_gate_candles_use_gate_column_order() {
    let candles = to_canonical_candles(&parse(GATE_CANDLES_JSON), &GATE.candle_layout);

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].time.timestamp(), 1700000000);
    assert_eq!(candles[0].open, dec!(42000));
    assert_eq!(candles[0].high, dec!(42100));
    assert_eq!(candles[0].low, dec!(41900));
    assert_eq!(candles[0].close, dec!(42050));
    assert_eq!(candles[0].volume, dec!(100));
}

#[test]
fn test_kraken_ohlc_skips_vwap_column() {
    let candles = to_canonical_candles(&parse(KRAKEN_OHLC_JSON), &KRAKEN.candle_layout);

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, dec!(42050));
    assert_eq!(candles[0].volume, dec!(12.5));
    assert_eq!(candles[1].time.timestamp(), 1700000060);
}

#[test]
fn test_oversized_order_values_zero_out() {
    let before = Utc::now();
    let result = FetchOrderResult::from_response(&parse(OVERSIZED_ORDER_JSON), &GATE.statuses);

    assert!(result.success());
    assert_eq!(result.status(), OrderStatus::Filled);
    assert_eq!(result.filled(), dec!(0));
    assert_eq!(result.fee(), dec!(0));
    assert!(result.time() >= before);
}

#[test]
fn test_oversized_fill_values_zero_out() {
    let trades = to_canonical_trades(&parse(OVERSIZED_FILLS_JSON), &KUCOIN.trade_fields);

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].amount, dec!(0));
    assert_eq!(trades[0].fee.cost, dec!(0));
    assert_eq!(trades[0].fee.currency, "USDT");
    assert!(trades[0].error.is_none());
}

#[test]
fn test_oversized_balance_total_zeroes_out() {
    let balances = to_canonical_balances(&parse(OVERSIZED_BALANCE_JSON), &OKX.balance_fields);

    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].asset, "BTC");
    assert_eq!(balances[0].total, dec!(0));
}

//! Numeric derivation chains shared by every order result.
//!
//! These are free functions over raw JSON so that both the fetch-order
//! and the place-order paths apply the same heuristics regardless of the
//! response shape. Every chain ends in a zero default.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use super::{decimal_at, first_nonzero, lookup, to_decimal};
use crate::models::OrderStatus;

/// Quantity in base currency that has been executed.
///
/// Reads `filled`, `executedQty`, then `data.executedQty`. Several
/// exchanges report zero for orders that are in fact fully filled, so for
/// a `Filled` order with a zero result and a raw `cost` the quantity is
/// recomputed as `cost / average`, or taken from `amount` when no usable
/// average exists.
pub fn derive_filled(raw: &Value, status: OrderStatus) -> Decimal {
    let reported = first_nonzero(raw, &["filled", "executedQty", "data.executedQty"])
        .unwrap_or(Decimal::ZERO);
    if reported > Decimal::ZERO || status != OrderStatus::Filled {
        return reported;
    }
    let Some(cost) = decimal_at(raw, "cost") else {
        return reported;
    };

    let average = derive_average(raw, status);
    if average > Decimal::ZERO {
        let filled = cost.checked_div(average).unwrap_or(Decimal::ZERO);
        debug!(%cost, %average, %filled, "filled recomputed from cost and average");
        return filled;
    }

    let amount = decimal_at(raw, "amount").unwrap_or(Decimal::ZERO);
    debug!(%amount, "filled taken from order amount");
    amount
}

/// Average execution price in quote currency.
///
/// Uses `average` when present. An `Ongoing` order has no meaningful
/// average yet and yields zero. Otherwise the average is computed from
/// `cummulativeQuoteQty / executedQty` when both are present (zero when
/// nothing executed), with `price` as the last resort.
pub fn derive_average(raw: &Value, status: OrderStatus) -> Decimal {
    if let Some(average) = first_nonzero(raw, &["average"]) {
        return average;
    }
    if status == OrderStatus::Ongoing {
        return Decimal::ZERO;
    }
    let quote = decimal_at(raw, "cummulativeQuoteQty");
    let executed = decimal_at(raw, "executedQty");
    if let (Some(quote), Some(executed)) = (quote, executed) {
        return quote.checked_div(executed).unwrap_or(Decimal::ZERO);
    }
    decimal_at(raw, "price").unwrap_or(Decimal::ZERO)
}

/// Notional in quote currency: `cost`, else `cummulativeQuoteQty`.
pub fn derive_cost(raw: &Value) -> Decimal {
    first_nonzero(raw, &["cost", "cummulativeQuoteQty"]).unwrap_or(Decimal::ZERO)
}

/// Fee charged on the order.
///
/// Accepts a plain number, a `{cost, currency}` object, a list of such
/// objects (summed), or a `commission` field. A sum that overflows falls
/// through to `commission`.
pub fn derive_fee(raw: &Value) -> Decimal {
    match lookup(raw, "fee") {
        Some(Value::Object(_)) => lookup(raw, "fee.cost").and_then(to_decimal),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| lookup(item, "cost").and_then(to_decimal))
            .try_fold(Decimal::ZERO, |total, cost| total.checked_add(cost)),
        Some(value) => to_decimal(value),
        None => None,
    }
    .or_else(|| decimal_at(raw, "commission"))
    .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn filled_reads_chain_in_order() {
        let raw = json!({"executedQty": "0.3", "data": {"executedQty": "0.4"}});
        assert_eq!(derive_filled(&raw, OrderStatus::PartialFilled), dec!(0.3));

        let raw = json!({"data": {"executedQty": "0.4"}});
        assert_eq!(derive_filled(&raw, OrderStatus::PartialFilled), dec!(0.4));
    }

    #[test]
    fn filled_recomputed_from_cost_over_average() {
        let raw = json!({"status": "closed", "cost": 100, "average": 50, "filled": 0});
        assert_eq!(derive_filled(&raw, OrderStatus::Filled), dec!(2));
    }

    #[test]
    fn filled_falls_back_to_amount_without_average() {
        let raw = json!({"cost": "250", "filled": "0", "amount": "0.75"});
        assert_eq!(derive_filled(&raw, OrderStatus::Filled), dec!(0.75));
    }

    #[test]
    fn filled_not_recomputed_for_open_orders() {
        let raw = json!({"cost": 100, "average": 50, "filled": 0});
        assert_eq!(derive_filled(&raw, OrderStatus::Ongoing), dec!(0));
        assert_eq!(derive_filled(&raw, OrderStatus::Cancelled), dec!(0));
    }

    #[test]
    fn filled_without_cost_stays_zero() {
        let raw = json!({"average": 50, "filled": 0, "amount": 3});
        assert_eq!(derive_filled(&raw, OrderStatus::Filled), dec!(0));
    }

    #[test]
    fn average_prefers_reported_value() {
        let raw = json!({"average": "101.5", "price": "100"});
        assert_eq!(derive_average(&raw, OrderStatus::Ongoing), dec!(101.5));
    }

    #[test]
    fn average_is_zero_while_open() {
        let raw = json!({"cummulativeQuoteQty": "100", "executedQty": "2", "price": "50"});
        assert_eq!(derive_average(&raw, OrderStatus::Ongoing), dec!(0));
    }

    #[test]
    fn average_from_cumulative_quote() {
        let raw = json!({"cummulativeQuoteQty": "100", "executedQty": "4"});
        assert_eq!(derive_average(&raw, OrderStatus::Filled), dec!(25));
    }

    #[test]
    fn average_is_zero_when_nothing_executed() {
        let raw = json!({
            "status": "CANCELED",
            "price": "42000.00",
            "executedQty": "0.00000000",
            "cummulativeQuoteQty": "0.00000000"
        });
        assert_eq!(derive_average(&raw, OrderStatus::Cancelled), dec!(0));

        let raw = json!({"cummulativeQuoteQty": "10", "executedQty": "0", "price": "50"});
        assert_eq!(derive_average(&raw, OrderStatus::Cancelled), dec!(0));
    }

    #[test]
    fn fee_sum_overflow_falls_back() {
        let raw = json!({"fee": [{"cost": "7e28"}, {"cost": "7e28"}]});
        assert_eq!(derive_fee(&raw), dec!(0));

        let raw = json!({"fee": [{"cost": "7e28"}, {"cost": "7e28"}], "commission": "0.3"});
        assert_eq!(derive_fee(&raw), dec!(0.3));
    }

    #[test]
    fn average_falls_back_to_price() {
        let raw = json!({"price": "42000.5"});
        assert_eq!(derive_average(&raw, OrderStatus::Filled), dec!(42000.5));
        assert_eq!(derive_average(&json!({}), OrderStatus::Filled), dec!(0));
    }

    #[test]
    fn cost_chain() {
        assert_eq!(derive_cost(&json!({"cost": 12.5})), dec!(12.5));
        assert_eq!(
            derive_cost(&json!({"cummulativeQuoteQty": "99.9"})),
            dec!(99.9)
        );
        assert_eq!(derive_cost(&json!({})), dec!(0));
    }

    #[test]
    fn fee_shapes() {
        assert_eq!(derive_fee(&json!({"fee": "0.1"})), dec!(0.1));
        assert_eq!(
            derive_fee(&json!({"fee": {"cost": 0.2, "currency": "USDT"}})),
            dec!(0.2)
        );
        assert_eq!(
            derive_fee(&json!({"fee": [{"cost": "0.1"}, {"cost": "0.05"}]})),
            dec!(0.15)
        );
        assert_eq!(derive_fee(&json!({"commission": "0.3"})), dec!(0.3));
        assert_eq!(derive_fee(&json!({})), dec!(0));
    }
}

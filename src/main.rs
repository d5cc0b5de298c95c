use std::io::Read;

use serde_json::Value;
use tracing::Level;
use unifex::UnifexError;
use unifex::config::fetch_config;
use unifex::logging::{self, Category, record};
use unifex::models::{
    Exchange, FetchOrderResult, to_canonical_balances, to_canonical_candles, to_canonical_trades,
};

const USAGE: &str = "usage: unifex <order|trades|balance|candles> [exchange] < response.json";

/// Reads one raw exchange response from stdin and prints its canonical form.
fn main() -> Result<(), UnifexError> {
    let app_config = fetch_config()?;
    logging::init(&app_config.log);

    let mut args = std::env::args().skip(1);
    let kind = args
        .next()
        .ok_or_else(|| UnifexError::Config(USAGE.to_string()))?;
    let exchange = match args.next() {
        Some(name) => name.parse::<Exchange>()?,
        None => app_config.default_exchange.ok_or_else(|| {
            UnifexError::Config("no exchange given and UNIFEX_EXCHANGE is unset".to_string())
        })?,
    };

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| UnifexError::Config(format!("failed to read stdin: {err}")))?;
    let raw: Value = serde_json::from_str(&input)?;

    let profile = exchange.profile();
    let output = match kind.as_str() {
        "order" => FetchOrderResult::from_response(&raw, &profile.statuses).to_plain_object(),
        "trades" => Value::Array(
            to_canonical_trades(&raw, &profile.trade_fields)
                .iter()
                .map(|trade| trade.to_plain_object())
                .collect(),
        ),
        "balance" => Value::Array(
            to_canonical_balances(&raw, &profile.balance_fields)
                .iter()
                .map(|balance| balance.to_plain_object())
                .collect(),
        ),
        "candles" => Value::Array(
            to_canonical_candles(&raw, &profile.candle_layout)
                .iter()
                .map(|candle| candle.to_plain_object())
                .collect(),
        ),
        _ => return Err(UnifexError::Config(USAGE.to_string())),
    };

    record(
        Category::Exchange,
        Level::INFO,
        &format!("{exchange} {kind} response normalized"),
    );
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

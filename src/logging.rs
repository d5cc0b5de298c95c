//! Process-wide log sink.
//!
//! [`init`] installs a `tracing-subscriber` formatter once at startup.
//! [`record`] is the single entry point for categorised log lines; the
//! category travels as a structured field so sinks can filter on it.

use tracing::{Level, debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Area of the system a log line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Exchange,
    Order,
    Trade,
    Balance,
    Candle,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Exchange => "exchange",
            Category::Order => "order",
            Category::Trade => "trade",
            Category::Balance => "balance",
            Category::Candle => "candle",
        }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(config: &LogConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.filter))
        .with_target(false);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Plain => builder.try_init(),
    };

    if let Err(err) = result {
        debug!(%err, "tracing subscriber already installed");
    }
}

/// Emits one log line for `category` at `level`.
pub fn record(category: Category, level: Level, message: &str) {
    let category = category.as_str();
    if level == Level::ERROR {
        error!(category, "{message}");
    } else if level == Level::WARN {
        warn!(category, "{message}");
    } else if level == Level::INFO {
        info!(category, "{message}");
    } else if level == Level::DEBUG {
        debug!(category, "{message}");
    } else {
        trace!(category, "{message}");
    }
}

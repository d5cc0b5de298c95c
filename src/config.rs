//! Application configuration loaded from environment variables.
//!
//! - `UNIFEX_LOG`: tracing filter directive (falls back to `RUST_LOG`,
//!   then `info`)
//! - `UNIFEX_LOG_FORMAT`: `plain` (default) or `json`
//! - `UNIFEX_EXCHANGE`: optional default exchange name

use std::str::FromStr;

use crate::models::Exchange;

/// Filter used when neither `UNIFEX_LOG` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log: LogConfig,
    pub default_exchange: Option<Exchange>,
}

/// Output format of the log sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = crate::UnifexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(crate::UnifexError::Config(format!(
                "UNIFEX_LOG_FORMAT must be `plain` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            format: LogFormat::Plain,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`UnifexError::Config`](crate::UnifexError::Config) if the log
/// format or the default exchange is not recognised.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let filter = non_empty_var("UNIFEX_LOG")
        .or_else(|| non_empty_var("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let format = match non_empty_var("UNIFEX_LOG_FORMAT") {
        Some(value) => value.parse()?,
        None => LogFormat::default(),
    };

    let default_exchange = match non_empty_var("UNIFEX_EXCHANGE") {
        Some(name) => Some(name.parse::<Exchange>().map_err(|_| {
            crate::UnifexError::Config(format!("UNIFEX_EXCHANGE names an unknown exchange: {name}"))
        })?),
        None => None,
    };

    Ok(AppConfig {
        log: LogConfig { filter, format },
        default_exchange,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

use std::str::FromStr;
use std::time::Duration;

use crate::{Error, Result};

/// Timeframes the scanner knows how to evaluate.
pub const SUPPORTED_TIMEFRAMES: &[&str] = &["15m"];

/// All configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    /// Broadcast chat for scan alerts.
    pub group_chat_id: i64,

    // Scanning
    pub scan_interval: Duration,
    pub symbol_limit: usize,
    pub candle_limit: usize,
    pub timeframe: String,
    /// Queue full-universe scans instead of letting them overlap.
    pub serialize_scans: bool,

    // Upstream services
    pub binance_base_url: String,
    pub coingecko_base_url: String,
    pub coingecko_exchange_id: String,

    /// Optional TOML file with indicator and quorum parameters.
    pub signal_config_path: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .or_else(|| lookup("BOT_TOKEN"))
            .ok_or_else(|| Error::Config("TELEGRAM_TOKEN (or BOT_TOKEN) is not set".into()))?;

        let group_chat_id = required(&lookup, "GROUP_CHAT_ID")?;

        let timeframe = lookup("TIMEFRAME").unwrap_or_else(|| "15m".to_string());
        if !SUPPORTED_TIMEFRAMES.contains(&timeframe.as_str()) {
            return Err(Error::Config(format!(
                "TIMEFRAME must be one of {SUPPORTED_TIMEFRAMES:?}, got '{timeframe}'"
            )));
        }

        let interval_minutes: u64 = optional(&lookup, "SCAN_INTERVAL_MINUTES")?.unwrap_or(30);
        if interval_minutes == 0 {
            return Err(Error::Config("SCAN_INTERVAL_MINUTES must be positive".into()));
        }

        Ok(Config {
            telegram_token,
            group_chat_id,
            scan_interval: Duration::from_secs(interval_minutes * 60),
            symbol_limit: optional(&lookup, "SYMBOL_LIMIT")?.unwrap_or(200),
            candle_limit: optional(&lookup, "CANDLE_LIMIT")?.unwrap_or(100),
            timeframe,
            serialize_scans: optional(&lookup, "SERIALIZE_SCANS")?.unwrap_or(false),
            binance_base_url: lookup("BINANCE_BASE_URL")
                .unwrap_or_else(|| "https://api.binance.com".to_string()),
            coingecko_base_url: lookup("COINGECKO_BASE_URL")
                .unwrap_or_else(|| "https://api.coingecko.com".to_string()),
            coingecko_exchange_id: lookup("COINGECKO_EXCHANGE_ID")
                .unwrap_or_else(|| "binance".to_string()),
            signal_config_path: lookup("SIGNAL_CONFIG_PATH"),
        })
    }
}

fn required<F, T>(lookup: &F, key: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    optional(lookup, key)?.ok_or_else(|| {
        Error::Config(format!(
            "Required environment variable '{key}' is not set. Check your .env file."
        ))
    })
}

fn optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{key} has an invalid value: '{raw}'"))),
    }
}

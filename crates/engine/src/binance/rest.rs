use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{Candle, Error, MarketData, Result};

const BASE_URL: &str = "https://api.binance.com";

/// Binance accepts at most this many klines per request.
const MAX_KLINES: usize = 1000;

/// Public (unsigned) REST client for Binance spot market data.
pub struct BinanceClient {
    base_url: String,
    http: Client,
}

impl BinanceClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at another host (a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn public_get(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let url = format!("{}{path}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Exchange(format!("HTTP {status}: {body}")));
        }
        Ok(body)
    }
}

/// `"BTC/USDT"` -> `"BTCUSDT"`.
pub fn exchange_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let pair = exchange_symbol(symbol);
        let limit = limit.clamp(1, MAX_KLINES);
        debug!(pair = %pair, interval = %timeframe, limit, "Fetching klines from Binance");

        let body = self
            .public_get(
                "/api/v3/klines",
                &[
                    ("symbol", pair),
                    ("interval", timeframe.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let rows: Vec<Vec<Value>> = serde_json::from_str(&body)?;
        rows.iter().map(|row| parse_kline_row(row)).collect()
    }

    async fn tradable_markets(&self) -> Result<HashSet<String>> {
        let body = self.public_get("/api/v3/exchangeInfo", &[]).await?;
        let info: ExchangeInfo =
            serde_json::from_str(&body).map_err(|e| Error::Exchange(e.to_string()))?;

        let markets: HashSet<String> = info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| format!("{}/{}", s.base_asset, s.quote_asset))
            .collect();

        debug!(count = markets.len(), "Loaded tradable markets");
        Ok(markets)
    }
}

// ─── Response parsing ─────────────────────────────────────────────────────────

/// Kline rows are positional: `[openTime, open, high, low, close, volume, closeTime, ...]`
/// with prices and volume encoded as strings.
fn parse_kline_row(row: &[Value]) -> Result<Candle> {
    let open_time_ms = row
        .first()
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::Exchange("kline row missing open time".into()))?;

    let timestamp: DateTime<Utc> = Utc
        .timestamp_millis_opt(open_time_ms)
        .single()
        .ok_or_else(|| Error::Exchange(format!("invalid kline timestamp {open_time_ms}")))?;

    Ok(Candle {
        timestamp,
        open: decimal_field(row, 1, "open")?,
        high: decimal_field(row, 2, "high")?,
        low: decimal_field(row, 3, "low")?,
        close: decimal_field(row, 4, "close")?,
        volume: decimal_field(row, 5, "volume")?,
    })
}

fn decimal_field(row: &[Value], index: usize, name: &str) -> Result<f64> {
    let value = row
        .get(index)
        .ok_or_else(|| Error::Exchange(format!("kline row missing {name}")))?;
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| Error::Exchange(format!("kline {name} is not a number: '{s}'"))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::Exchange(format!("kline {name} out of range"))),
        other => Err(Error::Exchange(format!("kline {name} has unexpected type: {other}"))),
    }
}

#[derive(Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolInfo {
    status: String,
    base_asset: String,
    quote_asset: String,
}

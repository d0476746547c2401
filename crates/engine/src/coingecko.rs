use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{Error, PairDiscovery, Result, TickerPair};

const BASE_URL: &str = "https://api.coingecko.com";

/// Pair discovery backed by CoinGecko's per-exchange ticker listing.
///
/// Only the first page is requested; CoinGecko orders it by volume, which is
/// what makes the resulting universe a "top pairs" list.
pub struct CoinGeckoClient {
    base_url: String,
    exchange_id: String,
    http: Client,
}

impl CoinGeckoClient {
    pub fn new(exchange_id: impl Into<String>) -> Result<Self> {
        Self::with_base_url(BASE_URL, exchange_id)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        exchange_id: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("quorumbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            exchange_id: exchange_id.into(),
            http,
        })
    }
}

#[async_trait]
impl PairDiscovery for CoinGeckoClient {
    async fn list_tickers(&self) -> Result<Vec<TickerPair>> {
        let url = format!(
            "{}/api/v3/exchanges/{}/tickers",
            self.base_url, self.exchange_id
        );
        debug!(url = %url, "Requesting tickers from CoinGecko");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Discovery(format!("HTTP {status}: {body}")));
        }

        let tickers: TickersResponse =
            serde_json::from_str(&body).map_err(|e| Error::Discovery(e.to_string()))?;
        Ok(tickers.tickers)
    }
}

#[derive(Deserialize)]
struct TickersResponse {
    tickers: Vec<TickerPair>,
}

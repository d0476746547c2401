use std::sync::Arc;

use tracing::warn;

use common::{Candle, MarketData, SkipReason};

/// Pulls a fixed window of candles for one symbol.
///
/// A failed request is reported as `SkipReason::FetchFailed` so batch callers
/// can move on to the next symbol. No retries.
pub struct CandleFetcher {
    market: Arc<dyn MarketData>,
    timeframe: String,
    limit: usize,
}

impl CandleFetcher {
    pub fn new(market: Arc<dyn MarketData>, timeframe: impl Into<String>, limit: usize) -> Self {
        Self {
            market,
            timeframe: timeframe.into(),
            limit,
        }
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    /// Candles oldest first with strictly increasing timestamps.
    pub async fn fetch(&self, symbol: &str) -> Result<Vec<Candle>, SkipReason> {
        match self
            .market
            .fetch_candles(symbol, &self.timeframe, self.limit)
            .await
        {
            Ok(mut candles) => {
                candles.sort_by_key(|c| c.timestamp);
                candles.dedup_by_key(|c| c.timestamp);
                Ok(candles)
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Candle fetch failed");
                Err(SkipReason::FetchFailed(e.to_string()))
            }
        }
    }
}

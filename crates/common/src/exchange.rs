use std::collections::HashSet;

use async_trait::async_trait;

use crate::{Candle, Result, ScanResult, TickerPair};

/// Read-only access to an exchange's market data.
///
/// `BinanceClient` implements this against the public REST API.
/// Symbols are always `"BASE/QUOTE"`; adapters translate to their own format.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// The most recent `limit` candles for `symbol`, oldest first.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>>;

    /// Identifiers of every symbol currently open for trading.
    /// Implementations must not cache across calls.
    async fn tradable_markets(&self) -> Result<HashSet<String>>;
}

/// Source of candidate pairs for a universe scan.
#[async_trait]
pub trait PairDiscovery: Send + Sync {
    async fn list_tickers(&self) -> Result<Vec<TickerPair>>;
}

/// Outbound channel for signals found during a universe scan.
#[async_trait]
pub trait SignalNotifier: Send + Sync {
    async fn broadcast_signal(&self, result: &ScanResult) -> Result<()>;
}

//! In-memory collaborators shared by the engine integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use common::{
    Candle, Error, MarketData, PairDiscovery, Result, ScanResult, SignalNotifier, TickerPair,
};
use engine::{ScanSettings, Scanner};
use strategy::SignalConfig;

pub fn series(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 900, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10.0,
        })
        .collect()
}

/// Flat market, a crash, then a small bounce: three long votes.
pub fn crash_then_uptick() -> Vec<f64> {
    let mut closes = vec![100.0; 98];
    closes.extend([60.0, 60.1]);
    closes
}

pub fn oscillating(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect()
}

pub fn pair(base: &str, target: &str) -> TickerPair {
    TickerPair {
        base: base.to_string(),
        target: target.to_string(),
    }
}

// ─── Exchange ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockMarket {
    candles: HashMap<String, std::result::Result<Vec<Candle>, String>>,
    markets: HashSet<String>,
    markets_down: bool,
    fetched: Mutex<Vec<String>>,
}

impl MockMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.candles.insert(symbol.to_string(), Ok(series(closes)));
        self.markets.insert(symbol.to_string());
        self
    }

    /// Tradable, but every candle request fails.
    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.candles
            .insert(symbol.to_string(), Err(format!("HTTP 500 for {symbol}")));
        self.markets.insert(symbol.to_string());
        self
    }

    pub fn with_markets_down(mut self) -> Self {
        self.markets_down = true;
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketData for MockMarket {
    async fn fetch_candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        self.fetched.lock().unwrap().push(symbol.to_string());
        match self.candles.get(symbol) {
            Some(Ok(candles)) => {
                let start = candles.len().saturating_sub(limit);
                Ok(candles[start..].to_vec())
            }
            Some(Err(msg)) => Err(Error::Exchange(msg.clone())),
            None => Err(Error::Exchange(format!("unknown symbol {symbol}"))),
        }
    }

    async fn tradable_markets(&self) -> Result<HashSet<String>> {
        if self.markets_down {
            return Err(Error::Http("exchangeInfo timed out".into()));
        }
        Ok(self.markets.clone())
    }
}

// ─── Discovery ────────────────────────────────────────────────────────────────

pub struct MockDiscovery {
    pairs: Option<Vec<TickerPair>>,
    calls: AtomicUsize,
}

impl MockDiscovery {
    pub fn new(pairs: Vec<TickerPair>) -> Self {
        Self {
            pairs: Some(pairs),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            pairs: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PairDiscovery for MockDiscovery {
    async fn list_tickers(&self) -> Result<Vec<TickerPair>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pairs
            .clone()
            .ok_or_else(|| Error::Discovery("HTTP 429: rate limited".into()))
    }
}

// ─── Notifier ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<ScanResult>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<ScanResult> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignalNotifier for RecordingNotifier {
    async fn broadcast_signal(&self, result: &ScanResult) -> Result<()> {
        self.sent.lock().unwrap().push(result.clone());
        if self.fail {
            return Err(Error::Notification("chat not found".into()));
        }
        Ok(())
    }
}

// ─── Scanner ──────────────────────────────────────────────────────────────────

pub fn settings(serialize_scans: bool) -> ScanSettings {
    ScanSettings {
        timeframe: "15m".to_string(),
        candle_limit: 100,
        symbol_limit: 200,
        serialize_scans,
    }
}

pub fn scanner(
    market: Arc<MockMarket>,
    discovery: Arc<MockDiscovery>,
    notifier: Arc<RecordingNotifier>,
) -> Scanner {
    Scanner::new(
        settings(false),
        &SignalConfig::default(),
        market,
        discovery,
        notifier,
    )
}

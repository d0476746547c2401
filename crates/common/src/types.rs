use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV period from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period open time.
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Indicator values for one candle, aligned by index with the candle series.
///
/// A field stays `None` until that indicator's warm-up window is satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub obv: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorRecord {
    /// Returns the record as plain values, or `None` if any indicator is still warming up.
    pub fn snapshot(&self) -> Option<IndicatorSnapshot> {
        Some(IndicatorSnapshot {
            rsi: self.rsi?,
            macd: self.macd?,
            macd_signal: self.macd_signal?,
            obv: self.obv?,
            bb_upper: self.bb_upper?,
            bb_lower: self.bb_lower?,
        })
    }
}

/// A fully-populated `IndicatorRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub obv: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
}

/// Direction of a single indicator vote or of an overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// Vote counts across the four indicator families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTally {
    pub long: u8,
    pub short: u8,
}

impl SignalTally {
    /// Number of indicator families that can vote.
    pub const VOTERS: u8 = 4;

    /// Adds one indicator family's vote. `None` abstains.
    pub fn record(&mut self, vote: Option<Direction>) {
        match vote {
            Some(Direction::Long) => self.long += 1,
            Some(Direction::Short) => self.short += 1,
            None => {}
        }
    }

    /// Long is checked before short.
    pub fn verdict(&self, quorum: u8) -> Option<Direction> {
        if self.long >= quorum {
            Some(Direction::Long)
        } else if self.short >= quorum {
            Some(Direction::Short)
        } else {
            None
        }
    }
}

/// Raw values behind a tally, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub rsi: f64,
    pub macd: f64,
    pub obv_delta: f64,
    pub close: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
}

/// Outcome of evaluating one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub symbol: String,
    pub timeframe: String,
    pub tally: SignalTally,
    pub diagnostics: Diagnostics,
    /// Set when one side reached the quorum.
    pub verdict: Option<Direction>,
}

/// Why a symbol produced no `ScanResult` on this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The tradable-market catalog could not be loaded.
    MarketsUnavailable(String),
    /// The symbol is not currently tradable on the exchange.
    NotTradable,
    FetchFailed(String),
    InsufficientCandles { got: usize, required: usize },
    /// The last two indicator records are not fully populated.
    IndicatorsWarmingUp,
}

impl SkipReason {
    /// Short label used when summarizing skips.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MarketsUnavailable(_) => "markets_unavailable",
            SkipReason::NotTradable => "not_tradable",
            SkipReason::FetchFailed(_) => "fetch_failed",
            SkipReason::InsufficientCandles { .. } => "insufficient_candles",
            SkipReason::IndicatorsWarmingUp => "warming_up",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MarketsUnavailable(e) => write!(f, "markets unavailable: {e}"),
            SkipReason::NotTradable => write!(f, "not tradable"),
            SkipReason::FetchFailed(e) => write!(f, "candle fetch failed: {e}"),
            SkipReason::InsufficientCandles { got, required } => {
                write!(f, "insufficient candles ({got} < {required})")
            }
            SkipReason::IndicatorsWarmingUp => write!(f, "indicators still warming up"),
        }
    }
}

/// A base/target pair as reported by pair discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerPair {
    pub base: String,
    pub target: String,
}

impl TickerPair {
    /// `"BASE/TARGET"` identifier.
    pub fn symbol(&self) -> String {
        format!("{}/{}", self.base, self.target)
    }
}

use serde::{Deserialize, Serialize};

use common::{Error, Result, SignalTally};

/// Indicator and quorum parameters (TOML). Every field is optional.
///
/// Example `config/signals.toml`:
/// ```toml
/// quorum = 3
/// min_candles = 20
///
/// [rsi]
/// period = 7
/// oversold = 30.0
/// overbought = 70.0
///
/// [macd]
/// fast = 12
/// slow = 26
/// signal = 9
///
/// [bollinger]
/// period = 20
/// std_dev = 2.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalConfig {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub bollinger: BollingerParams,
    /// Votes one side needs for a strong signal.
    pub quorum: u8,
    /// Series shorter than this are skipped before any indicator runs.
    pub min_candles: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi: RsiParams::default(),
            macd: MacdParams::default(),
            bollinger: BollingerParams::default(),
            quorum: 3,
            min_candles: 20,
        }
    }
}

impl Default for RsiParams {
    fn default() -> Self {
        Self {
            period: 7,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl SignalConfig {
    /// Load from a TOML file and validate it.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Failed to load signal config at '{path}': {e}")))
    }

    /// Load from `path` when given, otherwise use the built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let cfg: SignalConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// A quorum above half the voters guarantees only one side can reach it.
    pub fn validate(&self) -> Result<()> {
        let min_quorum = SignalTally::VOTERS / 2 + 1;
        if !(min_quorum..=SignalTally::VOTERS).contains(&self.quorum) {
            return invalid(format!(
                "quorum must be between {min_quorum} and {}, got {}",
                SignalTally::VOTERS,
                self.quorum
            ));
        }
        if self.rsi.period < 2 {
            return invalid(format!("rsi.period must be >= 2, got {}", self.rsi.period));
        }
        if self.rsi.oversold >= self.rsi.overbought {
            return invalid(format!(
                "rsi.oversold ({}) must be below rsi.overbought ({})",
                self.rsi.oversold, self.rsi.overbought
            ));
        }
        if self.macd.fast < 2 || self.macd.fast >= self.macd.slow {
            return invalid(format!(
                "macd.fast must be >= 2 and below macd.slow ({} vs {})",
                self.macd.fast, self.macd.slow
            ));
        }
        if self.macd.signal < 1 {
            return invalid("macd.signal must be >= 1".to_string());
        }
        if self.bollinger.period < 2 || self.bollinger.std_dev <= 0.0 {
            return invalid(format!(
                "bollinger needs period >= 2 and std_dev > 0, got {} / {}",
                self.bollinger.period, self.bollinger.std_dev
            ));
        }
        if self.min_candles < 2 {
            return invalid(format!("min_candles must be >= 2, got {}", self.min_candles));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(Error::InvalidInput(msg))
}

use common::{Candle, IndicatorRecord};

use crate::config::SignalConfig;
use crate::indicators::{obv_series, BollingerBands, MacdIndicator, RsiIndicator};

/// Builds one `IndicatorRecord` per candle.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    rsi: RsiIndicator,
    macd: MacdIndicator,
    bollinger: BollingerBands,
}

impl IndicatorEngine {
    /// `cfg` must have passed `SignalConfig::validate`.
    pub fn new(cfg: &SignalConfig) -> Self {
        Self {
            rsi: RsiIndicator::new(cfg.rsi.period),
            macd: MacdIndicator::new(cfg.macd.fast, cfg.macd.slow, cfg.macd.signal),
            bollinger: BollingerBands::new(cfg.bollinger.period, cfg.bollinger.std_dev),
        }
    }

    pub fn compute(&self, candles: &[Candle]) -> Vec<IndicatorRecord> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let rsi = self.rsi.series(&closes);
        let macd = self.macd.series(&closes);
        let obv = obv_series(&closes, &volumes);
        let bands = self.bollinger.series(&closes);

        (0..candles.len())
            .map(|i| IndicatorRecord {
                rsi: rsi[i],
                macd: macd.macd[i],
                macd_signal: macd.signal[i],
                obv: obv[i],
                bb_upper: bands[i].map(|b| b.upper),
                bb_lower: bands[i].map(|b| b.lower),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: Utc.timestamp_opt(i as i64 * 900, 0).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn records_align_with_candles() {
        let engine = IndicatorEngine::new(&SignalConfig::default());
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let records = engine.compute(&candles(&closes));
        assert_eq!(records.len(), 50);
        assert!(records[32].snapshot().is_none());
        assert!(records[33].snapshot().is_some());
        assert!(records[49].snapshot().is_some());
    }

    #[test]
    fn empty_series_yields_no_records() {
        let engine = IndicatorEngine::new(&SignalConfig::default());
        assert!(engine.compute(&[]).is_empty());
    }
}

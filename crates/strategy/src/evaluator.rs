use common::{
    Candle, Diagnostics, Direction, IndicatorRecord, IndicatorSnapshot, SignalTally, SkipReason,
};

use crate::config::RsiParams;
use crate::indicators::MacdSignal;

/// Tally and display values from the latest two indicator records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub tally: SignalTally,
    pub diagnostics: Diagnostics,
}

/// Reduces indicator records to four independent long/short votes.
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    oversold: f64,
    overbought: f64,
}

impl SignalEvaluator {
    pub fn new(rsi: &RsiParams) -> Self {
        Self {
            oversold: rsi.oversold,
            overbought: rsi.overbought,
        }
    }

    /// Rejects input whose last two records are not fully populated.
    pub fn evaluate(
        &self,
        candles: &[Candle],
        records: &[IndicatorRecord],
    ) -> Result<Evaluation, SkipReason> {
        let n = records.len();
        if n < 2 || candles.len() != n {
            return Err(SkipReason::IndicatorsWarmingUp);
        }
        let (Some(prev), Some(curr)) = (records[n - 2].snapshot(), records[n - 1].snapshot())
        else {
            return Err(SkipReason::IndicatorsWarmingUp);
        };
        let close = candles[n - 1].close;
        Ok(self.evaluate_snapshots(&prev, &curr, close))
    }

    pub fn evaluate_snapshots(
        &self,
        prev: &IndicatorSnapshot,
        curr: &IndicatorSnapshot,
        close: f64,
    ) -> Evaluation {
        let obv_delta = curr.obv - prev.obv;

        let mut tally = SignalTally::default();
        tally.record(self.rsi_vote(curr.rsi));
        tally.record(macd_vote(prev, curr));
        tally.record(obv_vote(obv_delta));
        tally.record(band_vote(close, curr.bb_upper, curr.bb_lower));

        Evaluation {
            tally,
            diagnostics: Diagnostics {
                rsi: curr.rsi,
                macd: curr.macd,
                obv_delta,
                close,
                bb_upper: curr.bb_upper,
                bb_lower: curr.bb_lower,
            },
        }
    }

    /// Strict thresholds: values on either boundary abstain.
    pub fn rsi_vote(&self, rsi: f64) -> Option<Direction> {
        if rsi < self.oversold {
            Some(Direction::Long)
        } else if rsi > self.overbought {
            Some(Direction::Short)
        } else {
            None
        }
    }
}

pub fn macd_vote(prev: &IndicatorSnapshot, curr: &IndicatorSnapshot) -> Option<Direction> {
    match MacdSignal::from_bars(prev.macd, prev.macd_signal, curr.macd, curr.macd_signal) {
        MacdSignal::Bullish => Some(Direction::Long),
        MacdSignal::Bearish => Some(Direction::Short),
        MacdSignal::Neutral => None,
    }
}

pub fn obv_vote(delta: f64) -> Option<Direction> {
    if delta > 0.0 {
        Some(Direction::Long)
    } else if delta < 0.0 {
        Some(Direction::Short)
    } else {
        None
    }
}

/// Touching a band counts. The lower band is checked first, so a degenerate
/// band where the close satisfies both sides votes long.
pub fn band_vote(close: f64, upper: f64, lower: f64) -> Option<Direction> {
    if close <= lower {
        Some(Direction::Long)
    } else if close >= upper {
        Some(Direction::Short)
    } else {
        None
    }
}

pub mod config;
pub mod evaluator;
pub mod indicators;
pub mod records;

pub use config::SignalConfig;
pub use evaluator::{Evaluation, SignalEvaluator};
pub use records::IndicatorEngine;

use common::{Candle, Direction, SkipReason};
use tracing::trace;

/// Candle series in, tally out: indicator engine followed by the evaluator.
#[derive(Debug, Clone)]
pub struct SignalPipeline {
    engine: IndicatorEngine,
    evaluator: SignalEvaluator,
    quorum: u8,
    min_candles: usize,
}

impl SignalPipeline {
    /// `cfg` must have passed `SignalConfig::validate`.
    pub fn new(cfg: &SignalConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(cfg),
            evaluator: SignalEvaluator::new(&cfg.rsi),
            quorum: cfg.quorum,
            min_candles: cfg.min_candles,
        }
    }

    pub fn quorum(&self) -> u8 {
        self.quorum
    }

    /// Evaluate the latest bar of `candles` (oldest first).
    pub fn run(&self, candles: &[Candle]) -> Result<Evaluation, SkipReason> {
        if candles.len() < self.min_candles {
            return Err(SkipReason::InsufficientCandles {
                got: candles.len(),
                required: self.min_candles,
            });
        }
        let records = self.engine.compute(candles);
        let evaluation = self.evaluator.evaluate(candles, &records)?;
        trace!(tally = ?evaluation.tally, "Evaluated candle series");
        Ok(evaluation)
    }

    /// Direction whose votes reached the quorum, if any.
    pub fn verdict(&self, evaluation: &Evaluation) -> Option<Direction> {
        evaluation.tally.verdict(self.quorum)
    }
}

use proptest::prelude::*;

use chrono::{TimeZone, Utc};
use common::{Candle, IndicatorSnapshot};
use strategy::config::RsiParams;
use strategy::{IndicatorEngine, SignalConfig, SignalEvaluator, SignalPipeline};

fn snapshot_strategy() -> impl Strategy<Value = IndicatorSnapshot> {
    (
        0.0f64..100.0,
        -10.0f64..10.0,
        -10.0f64..10.0,
        -1.0e6f64..1.0e6,
        0.0f64..200.0,
        0.0f64..200.0,
    )
        .prop_map(|(rsi, macd, macd_signal, obv, bb_upper, bb_lower)| IndicatorSnapshot {
            rsi,
            macd,
            macd_signal,
            obv,
            bb_upper,
            bb_lower,
        })
}

fn candles(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| Candle {
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 900, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        })
        .collect()
}

proptest! {
    /// Four voters, one vote each: the sides can never both reach the quorum.
    #[test]
    fn tally_never_exceeds_four_votes(
        prev in snapshot_strategy(),
        curr in snapshot_strategy(),
        close in 0.0f64..200.0,
    ) {
        let evaluator = SignalEvaluator::new(&RsiParams::default());
        let tally = evaluator.evaluate_snapshots(&prev, &curr, close).tally;
        prop_assert!(tally.long + tally.short <= 4);
        prop_assert!(!(tally.long >= 3 && tally.short >= 3));
    }

    /// Indicator math must stay total on arbitrary positive price paths.
    #[test]
    fn pipeline_never_panics_on_random_series(
        closes in prop::collection::vec(0.0001f64..1_000_000.0, 0..120),
        volume in 0.0f64..1.0e9,
    ) {
        let volumes = vec![volume; closes.len()];
        let series = candles(&closes, &volumes);
        let pipeline = SignalPipeline::new(&SignalConfig::default());
        let _ = pipeline.run(&series);

        let records = IndicatorEngine::new(&SignalConfig::default()).compute(&series);
        prop_assert_eq!(records.len(), series.len());
        for rsi in records.iter().filter_map(|r| r.rsi) {
            prop_assert!((0.0..=100.0).contains(&rsi), "RSI out of range: {}", rsi);
        }
    }
}

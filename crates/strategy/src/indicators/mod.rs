pub mod bollinger;
pub mod macd;
pub mod obv;
pub mod rsi;

pub use bollinger::{Band, BollingerBands};
pub use macd::{MacdIndicator, MacdSeries, MacdSignal};
pub use obv::obv_series;
pub use rsi::RsiIndicator;

/// Exponential moving average over the whole slice, seeded with the first value.
pub(crate) fn ema(data: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(data.len());
    let mut prev: Option<f64> = None;
    for &value in data {
        let next = match prev {
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

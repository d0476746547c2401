use super::ema;

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal_period).
/// Every EMA is seeded with its first input value. The MACD line is defined
/// once the slow EMA has `slow` observations; the signal line once it has
/// `signal` MACD values.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

/// MACD and signal lines aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Crossover state between two consecutive bars.
#[derive(Debug, Clone, PartialEq)]
pub enum MacdSignal {
    Bullish, // MACD crossed above signal line
    Bearish, // MACD crossed below signal line
    Neutral, // No crossover on the latest bar
}

impl MacdSignal {
    /// Classify the transition from the previous bar to the current one.
    /// Both comparisons are strict, so touching the signal line is not a cross.
    pub fn from_bars(prev_macd: f64, prev_signal: f64, macd: f64, signal: f64) -> Self {
        if prev_macd < prev_signal && macd > signal {
            MacdSignal::Bullish
        } else if prev_macd > prev_signal && macd < signal {
            MacdSignal::Bearish
        } else {
            MacdSignal::Neutral
        }
    }
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast < slow,
            "MACD fast period must be less than slow period"
        );
        assert!(signal >= 1, "MACD signal period must be >= 1");
        Self { fast, slow, signal }
    }

    /// Compute both lines from a slice of close prices (oldest first).
    pub fn series(&self, closes: &[f64]) -> MacdSeries {
        let n = closes.len();
        let fast = ema(closes, span_alpha(self.fast));
        let slow = ema(closes, span_alpha(self.slow));

        let first = self.slow - 1;
        let macd: Vec<Option<f64>> = (0..n)
            .map(|i| (i >= first).then(|| fast[i] - slow[i]))
            .collect();

        let mut signal = vec![None; n];
        if n > first {
            let line: Vec<f64> = macd[first..].iter().flatten().copied().collect();
            let smoothed = ema(&line, span_alpha(self.signal));
            for (j, value) in smoothed.into_iter().enumerate() {
                if j + 1 >= self.signal {
                    signal[first + j] = Some(value);
                }
            }
        }

        MacdSeries { macd, signal }
    }
}

fn span_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

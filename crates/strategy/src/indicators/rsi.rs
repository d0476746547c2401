/// RSI (Relative Strength Index) indicator.
///
/// Gains and losses are smoothed with an exponential average of weight
/// `1 / period` seeded at the first bar (no bias adjustment), which is the
/// `ta` library's formulation of Wilder smoothing. The first bar has no prior
/// close and counts as a zero change.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// RSI for every close (oldest first). The first `period - 1` entries are `None`.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let alpha = 1.0 / self.period as f64;
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        let mut out = Vec::with_capacity(closes.len());

        for (i, &close) in closes.iter().enumerate() {
            let change = if i == 0 { 0.0 } else { close - closes[i - 1] };
            let gain = change.max(0.0);
            let loss = (-change).max(0.0);

            if i == 0 {
                avg_gain = gain;
                avg_loss = loss;
            } else {
                avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
                avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
            }

            if i + 1 < self.period {
                out.push(None);
            } else if avg_loss == 0.0 {
                out.push(Some(100.0));
            } else {
                let rs = avg_gain / avg_loss;
                out.push(Some(100.0 - 100.0 / (1.0 + rs)));
            }
        }
        out
    }
}

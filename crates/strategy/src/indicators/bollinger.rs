/// Bollinger Bands.
///
/// Middle = SMA(period); Upper/Lower = Middle ± `std_dev` × population
/// standard deviation of the same window.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub period: usize,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self { period, std_dev }
    }

    /// Bands for every close (oldest first). The first `period - 1` entries are `None`.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<Band>> {
        (0..closes.len())
            .map(|i| {
                if i + 1 < self.period {
                    return None;
                }
                let window = &closes[i + 1 - self.period..=i];
                let n = self.period as f64;
                let mean = window.iter().sum::<f64>() / n;
                let variance = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
                let width = self.std_dev * variance.sqrt();
                Some(Band {
                    upper: mean + width,
                    middle: mean,
                    lower: mean - width,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_use_population_std_dev() {
        let bb = BollingerBands::new(3, 2.0);
        let out = bb.series(&[1.0, 2.0, 3.0]);
        assert_eq!(out[..2], [None, None]);
        let band = out[2].unwrap();
        let width = 2.0 * (2.0f64 / 3.0).sqrt();
        assert!((band.middle - 2.0).abs() < 1e-12);
        assert!((band.upper - (2.0 + width)).abs() < 1e-12);
        assert!((band.lower - (2.0 - width)).abs() < 1e-12);
    }

    #[test]
    fn flat_prices_collapse_the_bands() {
        let bb = BollingerBands::new(20, 2.0);
        let band = bb.series(&[42.0; 25])[24].unwrap();
        assert_eq!(band.upper, 42.0);
        assert_eq!(band.lower, 42.0);
    }
}

/// On-Balance Volume.
///
/// Running total that adds a bar's volume when its close rises above the
/// previous close and subtracts it when the close falls; an unchanged close
/// leaves the total as it was. The first bar has no prior close and is `None`.
pub fn obv_series(closes: &[f64], volumes: &[f64]) -> Vec<Option<f64>> {
    debug_assert_eq!(closes.len(), volumes.len());
    let mut total = 0.0;
    let mut out = Vec::with_capacity(closes.len());

    for i in 0..closes.len().min(volumes.len()) {
        if i == 0 {
            out.push(None);
            continue;
        }
        if closes[i] > closes[i - 1] {
            total += volumes[i];
        } else if closes[i] < closes[i - 1] {
            total -= volumes[i];
        }
        out.push(Some(total));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obv_accumulates_by_close_direction() {
        let closes = [10.0, 11.0, 11.0, 9.0];
        let volumes = [5.0, 3.0, 4.0, 2.0];
        assert_eq!(
            obv_series(&closes, &volumes),
            vec![None, Some(3.0), Some(3.0), Some(1.0)]
        );
    }

    #[test]
    fn obv_of_empty_input_is_empty() {
        assert!(obv_series(&[], &[]).is_empty());
    }
}

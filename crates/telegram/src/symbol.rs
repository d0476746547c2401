/// Quote currencies recognized when a pair is typed without a separator,
/// in match order.
pub const QUOTE_SUFFIXES: &[&str] = &["USDT", "BUSD", "ETH", "BTC"];

/// Turn user input such as `btcusdt` into the `"BTC/USDT"` form used for
/// market lookup. Input that already has a `/`, or that matches no known
/// quote suffix, is only uppercased.
pub fn normalize_symbol(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.contains('/') {
        return upper;
    }
    for quote in QUOTE_SUFFIXES {
        if let Some(base) = upper.strip_suffix(quote) {
            if !base.is_empty() {
                return format!("{base}/{quote}");
            }
        }
    }
    upper
}

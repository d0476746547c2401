use common::{Direction, ScanResult, SignalTally, SkipReason};
use engine::ScanReport;

/// Reply to `/start`.
pub fn help_text(interval_minutes: u64, quorum: u8) -> String {
    format!(
        "👋 Send /siga BTCUSDT for a manual analysis.\n\
         Strong signals ({quorum} of {} indicators agreeing) are posted to the group \
         automatically every {interval_minutes} minutes.\n\
         /update runs the scan right now.",
        SignalTally::VOTERS
    )
}

/// Markdown alert posted to the broadcast chat when a scan finds a quorum.
pub fn signal_alert(result: &ScanResult) -> String {
    let mut msg = format!(
        "📊 *SIGNAL DETECTED*: {} ({})\n{}",
        result.symbol,
        result.timeframe,
        body(result)
    );
    if let Some(direction) = result.verdict {
        msg.push_str(verdict_line(direction));
    }
    msg
}

/// Markdown reply to a single-pair analysis, with or without a quorum.
pub fn analysis(result: &ScanResult) -> String {
    let mut msg = format!(
        "📊 Analysis of {} ({}):\n{}",
        result.symbol,
        result.timeframe,
        body(result)
    );
    match result.verdict {
        Some(direction) => msg.push_str(verdict_line(direction)),
        None => msg.push_str("\n⚠️ No strong signal."),
    }
    msg
}

/// Plain-text reply when a single-pair analysis could not be produced.
pub fn skip_reply(symbol: &str, reason: &SkipReason) -> String {
    match reason {
        SkipReason::NotTradable => format!("❌ Invalid pair: {symbol}"),
        SkipReason::MarketsUnavailable(_) => {
            "❌ Could not load the exchange market list. Try again later.".to_string()
        }
        SkipReason::FetchFailed(_) => format!("❌ Failed to fetch data for {symbol}"),
        SkipReason::InsufficientCandles { got, required } => {
            format!("❌ Not enough history for {symbol} ({got} candles, need {required})")
        }
        SkipReason::IndicatorsWarmingUp => {
            format!("❌ Not enough history for {symbol} to compute every indicator")
        }
    }
}

pub fn usage() -> &'static str {
    "❗ Usage: /siga BTCUSDT"
}

pub fn scan_started(symbol_limit: usize) -> String {
    format!("⏳ Running manual analysis of the top {symbol_limit} pairs...")
}

pub fn scan_finished(report: &ScanReport) -> String {
    format!(
        "✅ Analysis complete: {} pairs evaluated, {} signals sent.",
        report.evaluated,
        report.signals.len()
    )
}

fn body(result: &ScanResult) -> String {
    let d = &result.diagnostics;
    format!(
        "🔸 RSI: {:.2}\n\
         🔸 MACD: {:.5}\n\
         🔸 OBV Δ: {}\n\
         🔸 Price: {:.4}\n\
         🔸 BBands: [{:.4} - {:.4}]\n\
         {}",
        d.rsi,
        d.macd,
        obv_arrow(d.obv_delta),
        d.close,
        d.bb_lower,
        d.bb_upper,
        tally_lines(&result.tally)
    )
}

fn tally_lines(tally: &SignalTally) -> String {
    format!(
        "✅ Long: {} / {}\n✅ Short: {} / {}\n",
        tally.long,
        SignalTally::VOTERS,
        tally.short,
        SignalTally::VOTERS
    )
}

fn obv_arrow(delta: f64) -> &'static str {
    if delta > 0.0 {
        "🔺"
    } else if delta < 0.0 {
        "🔻"
    } else {
        "➖"
    }
}

fn verdict_line(direction: Direction) -> &'static str {
    match direction {
        Direction::Long => "\n📢 *BUY SIGNAL (LONG)*",
        Direction::Short => "\n📢 *SELL SIGNAL (SHORT)*",
    }
}

#[cfg(test)]
mod tests {
    use common::Diagnostics;

    use super::*;

    fn result(verdict: Option<Direction>, tally: SignalTally) -> ScanResult {
        ScanResult {
            symbol: "BTC/USDT".to_string(),
            timeframe: "15m".to_string(),
            tally,
            diagnostics: Diagnostics {
                rsi: 24.567,
                macd: -0.000123456,
                obv_delta: 150.0,
                close: 60.1,
                bb_upper: 119.98,
                bb_lower: 72.03,
            },
            verdict,
        }
    }

    #[test]
    fn alert_lists_diagnostics_and_verdict() {
        let msg = signal_alert(&result(Some(Direction::Long), SignalTally { long: 3, short: 0 }));
        assert!(msg.starts_with("📊 *SIGNAL DETECTED*: BTC/USDT (15m)"));
        assert!(msg.contains("RSI: 24.57"));
        assert!(msg.contains("MACD: -0.00012"));
        assert!(msg.contains("OBV Δ: 🔺"));
        assert!(msg.contains("Price: 60.1000"));
        assert!(msg.contains("BBands: [72.0300 - 119.9800]"));
        assert!(msg.contains("Long: 3 / 4"));
        assert!(msg.contains("Short: 0 / 4"));
        assert!(msg.ends_with("*BUY SIGNAL (LONG)*"));
    }

    #[test]
    fn analysis_without_quorum_says_so() {
        let msg = analysis(&result(None, SignalTally { long: 2, short: 1 }));
        assert!(msg.starts_with("📊 Analysis of BTC/USDT (15m):"));
        assert!(msg.ends_with("⚠️ No strong signal."));
    }

    #[test]
    fn short_verdict_is_labelled_sell() {
        let msg = analysis(&result(Some(Direction::Short), SignalTally { long: 0, short: 4 }));
        assert!(msg.ends_with("*SELL SIGNAL (SHORT)*"));
    }

    #[test]
    fn help_names_quorum_and_interval() {
        let msg = help_text(30, 3);
        assert!(msg.contains("3 of 4 indicators agreeing"), "got {msg}");
        assert!(msg.contains("every 30 minutes"), "got {msg}");
    }

    #[test]
    fn zero_obv_delta_is_flat() {
        assert_eq!(obv_arrow(0.0), "➖");
        assert_eq!(obv_arrow(-1.0), "🔻");
    }

    #[test]
    fn skip_replies_name_the_pair() {
        assert_eq!(skip_reply("FOO/USDT", &SkipReason::NotTradable), "❌ Invalid pair: FOO/USDT");
        assert!(skip_reply("BTC/USDT", &SkipReason::FetchFailed("timeout".into()))
            .contains("BTC/USDT"));
    }
}

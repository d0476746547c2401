use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

use crate::scanner::Scanner;

/// Runs a universe scan on a fixed interval.
///
/// The first scan happens one full period after `run` starts. A scan that
/// outlasts the period delays the next tick instead of bunching up.
pub struct ScanScheduler {
    scanner: Arc<Scanner>,
    period: Duration,
}

impl ScanScheduler {
    pub fn new(scanner: Arc<Scanner>, period: Duration) -> Self {
        Self { scanner, period }
    }

    /// Run forever. Call from `tokio::spawn`.
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = self.period.as_secs(), "Scan scheduler running");

        loop {
            ticker.tick().await;
            info!("Scheduled scan triggered");
            let report = self.scanner.scan_universe().await;
            info!(signals = report.signals.len(), "Scheduled scan finished");
        }
    }
}

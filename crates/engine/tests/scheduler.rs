mod support;

use std::sync::Arc;
use std::time::Duration;

use engine::ScanScheduler;

use support::*;

#[tokio::test(start_paused = true)]
async fn scans_run_once_per_period_starting_after_first_interval() {
    let market = Arc::new(MockMarket::new());
    let discovery = Arc::new(MockDiscovery::new(vec![]));
    let notifier = Arc::new(RecordingNotifier::default());
    let scanner = Arc::new(scanner(market, discovery.clone(), notifier));

    let period = Duration::from_secs(30 * 60);
    let handle = tokio::spawn(ScanScheduler::new(scanner, period).run());

    tokio::time::sleep(period - Duration::from_secs(1)).await;
    assert_eq!(discovery.calls(), 0, "no scan before the first interval");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(discovery.calls(), 1);

    tokio::time::sleep(period).await;
    assert_eq!(discovery.calls(), 2);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn failing_scans_do_not_stop_the_schedule() {
    let market = Arc::new(MockMarket::new().with_markets_down());
    let discovery = Arc::new(MockDiscovery::failing());
    let notifier = Arc::new(RecordingNotifier::default());
    let scanner = Arc::new(scanner(market, discovery.clone(), notifier));

    let period = Duration::from_secs(60);
    let handle = tokio::spawn(ScanScheduler::new(scanner, period).run());

    tokio::time::sleep(period * 3 + Duration::from_secs(1)).await;
    assert_eq!(discovery.calls(), 3);

    handle.abort();
}

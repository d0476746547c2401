use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use common::{Config, MarketData, PairDiscovery, ScanResult, SignalNotifier, SkipReason};
use strategy::{SignalConfig, SignalPipeline};

use crate::fetcher::CandleFetcher;
use crate::universe::UniverseResolver;

/// Scanner settings taken from the process `Config`.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub timeframe: String,
    pub candle_limit: usize,
    pub symbol_limit: usize,
    pub serialize_scans: bool,
}

impl ScanSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            timeframe: cfg.timeframe.clone(),
            candle_limit: cfg.candle_limit,
            symbol_limit: cfg.symbol_limit,
            serialize_scans: cfg.serialize_scans,
        }
    }
}

/// Summary of one universe pass.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Symbols returned by the universe resolver.
    pub universe: usize,
    /// Symbols that produced a tally.
    pub evaluated: usize,
    /// Results that reached the quorum, in scan order.
    pub signals: Vec<ScanResult>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl ScanReport {
    /// Skip counts per reason.
    pub fn skip_summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary = BTreeMap::new();
        for (_, reason) in &self.skipped {
            *summary.entry(reason.kind()).or_insert(0) += 1;
        }
        summary
    }
}

/// Drives fetch → indicators → evaluation for one symbol or the whole universe.
///
/// Shared behind an `Arc` by the periodic scheduler and the chat handlers.
/// Universe scans may overlap unless `serialize_scans` is set; notifications
/// are not deduplicated across passes.
pub struct Scanner {
    market: Arc<dyn MarketData>,
    notifier: Arc<dyn SignalNotifier>,
    fetcher: CandleFetcher,
    universe: UniverseResolver,
    pipeline: SignalPipeline,
    scan_guard: Option<Mutex<()>>,
}

impl Scanner {
    /// `signal_cfg` must have passed `SignalConfig::validate`.
    pub fn new(
        settings: ScanSettings,
        signal_cfg: &SignalConfig,
        market: Arc<dyn MarketData>,
        discovery: Arc<dyn PairDiscovery>,
        notifier: Arc<dyn SignalNotifier>,
    ) -> Self {
        Self {
            fetcher: CandleFetcher::new(market.clone(), settings.timeframe, settings.candle_limit),
            universe: UniverseResolver::new(discovery, settings.symbol_limit),
            pipeline: SignalPipeline::new(signal_cfg),
            scan_guard: settings.serialize_scans.then(|| Mutex::new(())),
            market,
            notifier,
        }
    }

    /// Votes one side needs before a result is broadcast.
    pub fn quorum(&self) -> u8 {
        self.pipeline.quorum()
    }

    /// Scan every tradable symbol in the universe and broadcast quorum signals.
    /// Per-symbol problems are recorded in the report and never abort the pass.
    pub async fn scan_universe(&self) -> ScanReport {
        let _guard = match &self.scan_guard {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        info!("Starting universe scan");
        let symbols = self.universe.resolve().await;
        let mut report = ScanReport {
            universe: symbols.len(),
            ..ScanReport::default()
        };
        if symbols.is_empty() {
            return report;
        }

        let markets = match self.market.tradable_markets().await {
            Ok(markets) => markets,
            Err(e) => {
                warn!(error = %e, "Could not load tradable markets; aborting this pass");
                return report;
            }
        };

        for symbol in symbols {
            if !markets.contains(&symbol) {
                debug!(symbol = %symbol, "Skipping symbol not tradable on exchange");
                report.skipped.push((symbol, SkipReason::NotTradable));
                continue;
            }

            match self.evaluate_symbol(&symbol).await {
                Ok(result) => {
                    report.evaluated += 1;
                    if let Some(direction) = result.verdict {
                        info!(
                            symbol = %symbol,
                            direction = %direction,
                            tally = ?result.tally,
                            "Quorum signal"
                        );
                        if let Err(e) = self.notifier.broadcast_signal(&result).await {
                            warn!(symbol = %symbol, error = %e, "Failed to broadcast signal");
                        }
                        report.signals.push(result);
                    }
                }
                Err(reason) => {
                    debug!(symbol = %symbol, reason = %reason, "Skipping symbol");
                    report.skipped.push((symbol, reason));
                }
            }
        }

        info!(
            universe = report.universe,
            evaluated = report.evaluated,
            signals = report.signals.len(),
            skipped = ?report.skip_summary(),
            "Universe scan complete"
        );
        report
    }

    /// Evaluate one `"BASE/QUOTE"` symbol on demand. The result is returned
    /// whether or not it reached the quorum; nothing is broadcast.
    pub async fn analyze_symbol(&self, symbol: &str) -> Result<ScanResult, SkipReason> {
        let markets = self.market.tradable_markets().await.map_err(|e| {
            warn!(error = %e, "Could not load tradable markets");
            SkipReason::MarketsUnavailable(e.to_string())
        })?;
        if !markets.contains(symbol) {
            return Err(SkipReason::NotTradable);
        }
        self.evaluate_symbol(symbol).await
    }

    async fn evaluate_symbol(&self, symbol: &str) -> Result<ScanResult, SkipReason> {
        let candles = self.fetcher.fetch(symbol).await?;
        let evaluation = self.pipeline.run(&candles)?;
        Ok(ScanResult {
            symbol: symbol.to_string(),
            timeframe: self.fetcher.timeframe().to_string(),
            tally: evaluation.tally,
            diagnostics: evaluation.diagnostics,
            verdict: self.pipeline.verdict(&evaluation),
        })
    }
}

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use common::{PairDiscovery, TickerPair};

/// Builds the candidate symbol list for a universe scan.
pub struct UniverseResolver {
    discovery: Arc<dyn PairDiscovery>,
    limit: usize,
}

impl UniverseResolver {
    pub fn new(discovery: Arc<dyn PairDiscovery>, limit: usize) -> Self {
        Self { discovery, limit }
    }

    /// Discovery failures degrade to an empty universe.
    pub async fn resolve(&self) -> Vec<String> {
        match self.discovery.list_tickers().await {
            Ok(pairs) => {
                let universe = build_universe(&pairs, self.limit);
                info!(tickers = pairs.len(), symbols = universe.len(), "Resolved symbol universe");
                universe
            }
            Err(e) => {
                warn!(error = %e, "Pair discovery failed; scanning nothing this pass");
                Vec::new()
            }
        }
    }
}

/// Unique `"BASE/TARGET"` identifiers in lexicographic order, at most `limit`.
pub fn build_universe(pairs: &[TickerPair], limit: usize) -> Vec<String> {
    pairs
        .iter()
        .map(TickerPair::symbol)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(limit)
        .collect()
}

pub mod config;
pub mod error;
pub mod exchange;
pub mod types;

pub use config::{Config, SUPPORTED_TIMEFRAMES};
pub use error::{Error, Result};
pub use exchange::{MarketData, PairDiscovery, SignalNotifier};
pub use types::*;

pub mod binance;
pub mod coingecko;
pub mod fetcher;
pub mod scanner;
pub mod scheduler;
pub mod universe;

pub use binance::BinanceClient;
pub use coingecko::CoinGeckoClient;
pub use fetcher::CandleFetcher;
pub use scanner::{ScanReport, ScanSettings, Scanner};
pub use scheduler::ScanScheduler;
pub use universe::{build_universe, UniverseResolver};

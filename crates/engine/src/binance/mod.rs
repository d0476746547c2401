pub mod rest;

pub use rest::{exchange_symbol, BinanceClient};

use std::sync::Arc;

use anyhow::Context;
use teloxide::types::ChatId;
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::Config;
use engine::{BinanceClient, CoinGeckoClient, ScanScheduler, ScanSettings, Scanner};
use strategy::SignalConfig;
use telegram_ctrl::{start_bot, BotDeps, TelegramNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("invalid environment configuration")?;
    let signal_cfg = SignalConfig::load_or_default(cfg.signal_config_path.as_deref())
        .context("invalid signal configuration")?;
    info!(
        timeframe = %cfg.timeframe,
        interval_secs = cfg.scan_interval.as_secs(),
        symbol_limit = cfg.symbol_limit,
        quorum = signal_cfg.quorum,
        serialize_scans = cfg.serialize_scans,
        "QuorumBot starting"
    );

    // ── Data sources ──────────────────────────────────────────────────────────
    let market = Arc::new(BinanceClient::with_base_url(&cfg.binance_base_url)?);
    let discovery = Arc::new(CoinGeckoClient::with_base_url(
        &cfg.coingecko_base_url,
        &cfg.coingecko_exchange_id,
    )?);

    // ── Telegram ──────────────────────────────────────────────────────────────
    let bot = Bot::new(cfg.telegram_token.clone());
    let notifier = Arc::new(TelegramNotifier::new(bot.clone(), ChatId(cfg.group_chat_id)));

    // ── Scanner ───────────────────────────────────────────────────────────────
    let scanner = Arc::new(Scanner::new(
        ScanSettings::from_config(&cfg),
        &signal_cfg,
        market,
        discovery,
        notifier,
    ));

    let bot_deps = BotDeps {
        scanner: scanner.clone(),
        scan_interval: cfg.scan_interval,
        symbol_limit: cfg.symbol_limit,
    };

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    tokio::spawn(ScanScheduler::new(scanner, cfg.scan_interval).run());
    tokio::spawn(start_bot(bot, bot_deps));

    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received. Exiting.");
    Ok(())
}

use std::sync::Arc;
use std::time::Duration;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
    utils::command::{BotCommands, ParseError},
};
use tracing::{info, warn};

use engine::Scanner;

use crate::format;
use crate::notifier::send_markdown;
use crate::symbol::normalize_symbol;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Dependencies injected into every handler via `dptree`.
#[derive(Clone)]
pub struct BotDeps {
    /// Shared with the periodic scheduler.
    pub scanner: Arc<Scanner>,
    pub scan_interval: Duration,
    pub symbol_limit: usize,
}

/// Chat commands accepted from any user.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "QuorumBot commands:")]
pub enum Command {
    #[command(description = "Show help")]
    Start,
    #[command(description = "Analyze a single pair, e.g. /siga BTCUSDT", parse_with = raw_args)]
    Siga(String),
    #[command(description = "Scan the top pairs now")]
    Update,
}

/// Hand the raw argument text to the handler so it can answer arity errors.
fn raw_args(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

/// Register the command list and start the bot in long-polling mode.
pub async fn start_bot(bot: Bot, deps: BotDeps) {
    register_commands(&bot).await;

    let deps = Arc::new(deps);
    info!("Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/// Publish the command menu shown by Telegram clients.
pub async fn register_commands(bot: &Bot) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start))
        .branch(case![Command::Siga(args)].endpoint(handle_siga))
        .branch(case![Command::Update].endpoint(handle_update));

    Update::filter_message().branch(command_handler)
}

async fn handle_start(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let minutes = deps.scan_interval.as_secs() / 60;
    bot.send_message(msg.chat.id, format::help_text(minutes, deps.scanner.quorum())).await?;
    Ok(())
}

async fn handle_siga(bot: Bot, msg: Message, args: String, deps: Arc<BotDeps>) -> HandlerResult {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [raw] = parts.as_slice() else {
        bot.send_message(msg.chat.id, format::usage()).await?;
        return Ok(());
    };

    let symbol = normalize_symbol(raw);
    info!(symbol = %symbol, chat_id = msg.chat.id.0, "Manual analysis requested");

    match deps.scanner.analyze_symbol(&symbol).await {
        Ok(result) => send_markdown(&bot, msg.chat.id, format::analysis(&result)).await?,
        Err(reason) => {
            info!(symbol = %symbol, reason = %reason, "Manual analysis unavailable");
            bot.send_message(msg.chat.id, format::skip_reply(&symbol, &reason))
                .await?;
        }
    }
    Ok(())
}

async fn handle_update(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    info!(chat_id = msg.chat.id.0, "Manual universe scan requested");
    bot.send_message(msg.chat.id, format::scan_started(deps.symbol_limit))
        .await?;

    let report = deps.scanner.scan_universe().await;

    bot.send_message(msg.chat.id, format::scan_finished(&report))
        .await?;
    Ok(())
}

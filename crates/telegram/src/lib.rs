pub mod commands;
pub mod format;
pub mod notifier;
pub mod symbol;

pub use commands::{start_bot, BotDeps, Command};
pub use notifier::TelegramNotifier;
pub use symbol::normalize_symbol;

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use common::{Error, Result, ScanResult, SignalNotifier};

use crate::format;

/// Posts scan signals to the broadcast group.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl SignalNotifier for TelegramNotifier {
    async fn broadcast_signal(&self, result: &ScanResult) -> Result<()> {
        send_markdown(&self.bot, self.chat_id, format::signal_alert(result))
            .await
            .map_err(|e| Error::Notification(e.to_string()))
    }
}

/// Send `text` using Telegram's legacy Markdown mode, which needs no escaping
/// of the `.`/`-`/`[` characters our messages are full of.
#[allow(deprecated)]
pub async fn send_markdown(bot: &Bot, chat_id: ChatId, text: String) -> ResponseResult<()> {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

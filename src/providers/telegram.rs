use std::collections::HashSet;

use async_trait::async_trait;
use bytes::Bytes;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, InputFile, UpdateKind};
use teloxide::{Bot, RequestError};

/// The three Bot API operations the bot needs: discover chats from pending
/// updates, upload a photo, send a text message.
#[async_trait]
pub trait Messenger {
    async fn poll_chat_ids(&self) -> Result<HashSet<ChatId>, RequestError>;
    async fn send_photo(&self, chat: ChatId, photo: Bytes) -> Result<(), RequestError>;
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), RequestError>;
}

pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(token: &str) -> Self {
        TelegramMessenger {
            bot: Bot::new(token),
        }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    /// Reads the pending update backlog without an offset, so Telegram keeps
    /// re-serving recent updates; the recipient store makes that idempotent.
    async fn poll_chat_ids(&self) -> Result<HashSet<ChatId>, RequestError> {
        let updates = self.bot.get_updates().await?;
        let mut chats = HashSet::new();
        for update in updates {
            if let UpdateKind::Message(message) = update.kind {
                chats.insert(message.chat.id);
            }
        }
        Ok(chats)
    }

    async fn send_photo(&self, chat: ChatId, photo: Bytes) -> Result<(), RequestError> {
        self.bot.send_photo(chat, InputFile::memory(photo)).await?;
        Ok(())
    }

    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), RequestError> {
        self.bot.send_message(chat, text).await?;
        Ok(())
    }
}

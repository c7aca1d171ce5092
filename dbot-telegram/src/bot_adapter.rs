//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use std::path::Path;

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, DbotError, KeyboardButton, Presence, Result, TextFormat};
use teloxide::{
    prelude::*,
    types::{ButtonRequest, ChatAction, ChatId, InputFile, KeyboardMarkup, ParseMode},
};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn chat_action(presence: Presence) -> ChatAction {
    match presence {
        Presence::Typing => ChatAction::Typing,
        Presence::UploadDocument => ChatAction::UploadDocument,
    }
}

/// One button per row, resized to fit.
fn reply_keyboard(buttons: &[KeyboardButton]) -> KeyboardMarkup {
    let rows = buttons.iter().map(|b| {
        let button = teloxide::types::KeyboardButton::new(b.text.clone());
        let button = if b.request_location {
            button.request(ButtonRequest::Location)
        } else {
            button
        };
        vec![button]
    });
    KeyboardMarkup::new(rows).resize_keyboard()
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_text(&self, chat: &Chat, text: &str, format: TextFormat) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat.id), text.to_string());
        let request = match format {
            TextFormat::Html => request.parse_mode(ParseMode::Html),
            TextFormat::Plain => request,
        };
        request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_document(&self, chat: &Chat, path: &Path) -> Result<()> {
        self.bot
            .send_document(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_presence(&self, chat: &Chat, presence: Presence) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), chat_action(presence))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_keyboard_prompt(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[KeyboardButton],
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(reply_keyboard(buttons))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

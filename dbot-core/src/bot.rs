//! Outbound side of the bot.
//!
//! [`Bot`] is the MessageSender capability handlers reply through. It is transport-agnostic;
//! dbot-telegram implements it on top of teloxide and tests substitute a recording mock.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Chat;

/// How the text of an outbound message is interpreted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// Presence indicator shown in the chat while a reply is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Typing,
    UploadDocument,
}

/// One reply-keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    /// When set, pressing the button shares the user's location instead of sending `text`.
    pub request_location: bool,
}

impl KeyboardButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_location: false,
        }
    }

    pub fn location(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_location: true,
        }
    }
}

/// Sends replies to a chat. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message, optionally with HTML formatting.
    async fn send_text(&self, chat: &Chat, text: &str, format: TextFormat) -> Result<()>;

    /// Uploads the file at `path` as a document attachment.
    async fn send_document(&self, chat: &Chat, path: &Path) -> Result<()>;

    /// Shows a presence indicator ("typing...") in the chat.
    async fn send_presence(&self, chat: &Chat, presence: Presence) -> Result<()>;

    /// Sends a text message with a one-column reply keyboard.
    async fn send_keyboard_prompt(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[KeyboardButton],
    ) -> Result<()>;
}

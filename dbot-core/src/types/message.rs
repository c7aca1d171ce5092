//! Inbound message model: the normalized form of a provider update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, command::Command, user::User, user::UserId};

/// A shared location fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single inbound message with its sender, chat, and whatever payload it carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Raw text as typed by the user; None for non-text messages (location shares, stickers).
    pub text: Option<String>,
    /// Recognised leading command token, parsed from `text`.
    pub command: Option<Command>,
    pub location: Option<Location>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Message with no payload; combine with [`Message::with_text`] / [`Message::with_location`].
    pub fn new(id: impl Into<String>, user: User, chat: Chat) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            text: None,
            command: None,
            location: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the text and parses its command token.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.command = Command::parse(&text);
        self.text = Some(text);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Location {
            latitude,
            longitude,
        });
        self
    }

    /// Conversation key (the chat id).
    pub fn user_id(&self) -> UserId {
        self.chat.id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Name used in greetings: chat username, then sender username, then first name.
    pub fn display_name(&self) -> &str {
        self.chat
            .username
            .as_deref()
            .or(self.user.username.as_deref())
            .or(self.user.first_name.as_deref())
            .unwrap_or("")
    }
}

//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`]: text (with its command token)
/// and location fix are carried over; other media are dropped.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let user = msg
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_core())
            .unwrap_or_else(|| User::anonymous(msg.chat.id.0));

        let mut core = Message::new(msg.id.to_string(), user, self.chat());
        core.created_at = msg.date;
        if let Some(text) = msg.text() {
            core = core.with_text(text);
        }
        if let Some(location) = msg.location() {
            core = core.with_location(location.latitude, location.longitude);
        }
        core
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat(&self) -> Chat {
        let chat = &self.0.chat;
        let chat_type = if chat.is_private() {
            "private"
        } else if chat.is_group() {
            "group"
        } else if chat.is_supergroup() {
            "supergroup"
        } else {
            "channel"
        };
        Chat {
            id: chat.id.0,
            chat_type: chat_type.to_string(),
            username: chat.username().map(str::to_string),
        }
    }
}

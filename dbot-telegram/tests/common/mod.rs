//! Shared fixtures: a recording [`Bot`] and an echo handler chain.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dbot_core::{
    Bot, Chat, Handler, HandlerResponse, KeyboardButton, Message, Presence, Result, ServiceError,
    Step, TextFormat,
};
use handler_chain::HandlerChain;
use storage::ConversationStateStore;

/// Records every text sent, as `(chat_id, text)`.
#[derive(Default)]
pub struct MockBot {
    pub texts: Mutex<Vec<(i64, String)>>,
}

impl MockBot {
    pub fn texts(&self) -> Vec<(i64, String)> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_text(&self, chat: &Chat, text: &str, _format: TextFormat) -> Result<()> {
        self.texts.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn send_document(&self, _chat: &Chat, _path: &Path) -> Result<()> {
        Ok(())
    }

    async fn send_presence(&self, _chat: &Chat, _presence: Presence) -> Result<()> {
        Ok(())
    }

    async fn send_keyboard_prompt(
        &self,
        _chat: &Chat,
        _text: &str,
        _buttons: &[KeyboardButton],
    ) -> Result<()> {
        Ok(())
    }
}

/// Replies `echo: {text}`; fails for the text "boom"; texts starting with "slow" take 100ms.
pub struct EchoHandler {
    pub bot: Arc<MockBot>,
}

#[async_trait]
impl Handler for EchoHandler {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.text.is_some()
    }

    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let text = message.text().unwrap_or_default();
        if text == "boom" {
            return Err(ServiceError::BackendUnavailable("statistics".to_string()).into());
        }
        if text.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        self.bot
            .send_text(&message.chat, &format!("echo: {}", text), TextFormat::Plain)
            .await?;
        Ok(HandlerResponse::Stop)
    }
}

pub fn echo_chain(bot: Arc<MockBot>) -> HandlerChain {
    HandlerChain::new(Arc::new(ConversationStateStore::new()))
        .add_handler(Arc::new(EchoHandler { bot }))
}

/// Telegram update JSON for a private text message from chat `chat_id`.
pub fn text_update(chat_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1000,
        "message": {
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Alice", "username": "alice"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Alice", "username": "alice"},
            "text": text
        }
    })
}

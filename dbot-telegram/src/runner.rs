//! Long-polling runner: teloxide REPL feeding the same processor as the webhook.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use teloxide::prelude::*;
use tracing::{info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::processor::MessageProcessor;

/// Starts the REPL with the given teloxide Bot. Any webhook must be removed first, Telegram
/// refuses getUpdates while one is set. Each message is converted to a core message and
/// queued on its user's worker.
#[instrument(skip(bot, processor))]
pub async fn run_repl(bot: teloxide::Bot, processor: MessageProcessor) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Polling as bot");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let processor = processor.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();
            match msg.text() {
                Some(text) => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        message_content = %text,
                        "Received message"
                    );
                }
                None => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        has_location = core_msg.location.is_some(),
                        "Received non-text message"
                    );
                }
            }

            // Queued per user so the REPL returns immediately and order is kept.
            processor.enqueue(core_msg);
            Ok(())
        }
    })
    .await;

    Ok(())
}

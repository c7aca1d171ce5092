//! Shows the resolved handler's presence indicator ("typing...") before its body runs.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, Message, Middleware, Result, Route};
use tracing::{instrument, warn};

/// Sends `route.presence` to the message's chat. Runs for every resolved message, so the
/// indicator is shown even when the handler body later fails.
pub struct PresenceMiddleware {
    bot: Arc<dyn Bot>,
}

impl PresenceMiddleware {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Middleware for PresenceMiddleware {
    #[instrument(skip(self, message, route), fields(handler = route.handler))]
    async fn before(&self, message: &Message, route: &Route) -> Result<bool> {
        let Some(presence) = route.presence else {
            return Ok(true);
        };

        // Best effort.
        if let Err(e) = self.bot.send_presence(&message.chat, presence).await {
            warn!(
                chat_id = message.chat.id,
                presence = ?presence,
                error = %e,
                "Failed to send presence"
            );
        }
        Ok(true)
    }
}

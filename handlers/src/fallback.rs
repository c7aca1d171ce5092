//! Catch-all for text nothing else claimed: analytics requests, else the unknown-command reply.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{
    AnalyticsBackend, AnalyticsReport, Bot, Handler, HandlerError, HandlerResponse, Message,
    Presence, Result, Step, TemplateRenderer, TextFormat,
};
use tracing::{debug, info, instrument, warn};

use crate::analytics_gate::AnalyticsGate;
use crate::UNKNOWN_COMMAND_TEMPLATE;

pub struct FallbackHandler {
    bot: Arc<dyn Bot>,
    templates: Arc<dyn TemplateRenderer>,
    analytics: Arc<dyn AnalyticsBackend>,
    gate: AnalyticsGate,
}

impl FallbackHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        templates: Arc<dyn TemplateRenderer>,
        analytics: Arc<dyn AnalyticsBackend>,
        gate: AnalyticsGate,
    ) -> Self {
        Self {
            bot,
            templates,
            analytics,
            gate,
        }
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.text.is_some()
    }

    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let text = message.text().ok_or(HandlerError::NoText)?;

        let Some(query) = self.gate.parse(message.user_id(), text) else {
            debug!(user_id = message.user_id(), "Unknown command");
            let page = self
                .templates
                .render(UNKNOWN_COMMAND_TEMPLATE, &[("text_command", text)])
                .await?;
            self.bot
                .send_text(&message.chat, &page, TextFormat::Html)
                .await?;
            return Ok(HandlerResponse::Stop);
        };

        info!(
            user_id = message.user_id(),
            tokens = query.tokens.len(),
            mode = ?query.mode,
            "Analytics query"
        );
        match self.analytics.run_query(&query).await? {
            AnalyticsReport::Inline(report) => {
                self.bot
                    .send_text(&message.chat, &report, TextFormat::Plain)
                    .await?;
            }
            AnalyticsReport::File(path) => {
                if let Err(e) = self
                    .bot
                    .send_presence(&message.chat, Presence::UploadDocument)
                    .await
                {
                    // Best effort.
                    warn!(
                        error = %e,
                        user_id = message.user_id(),
                        "Failed to send upload indicator"
                    );
                }
                // The artifact is removed whether or not the upload went through.
                let sent = self.bot.send_document(&message.chat, &path).await;
                self.analytics.cleanup(message.user_id()).await?;
                sent?;
            }
        }
        Ok(HandlerResponse::Stop)
    }
}

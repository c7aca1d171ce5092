//! Informational commands: `/start`, `/help`, `/statistics`, `/contacts`.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{
    Bot, Command, Handler, HandlerResponse, KeyboardButton, Message, Result, StatisticsGateway,
    Step, TemplateRenderer, TextFormat,
};
use tracing::{info, instrument};

use crate::commands::{render_help, COMMANDS};
use crate::CONTACTS_TEMPLATE;

/// Greets the user, offers the location-share keyboard, then sends the help text.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    fn name(&self) -> &'static str {
        "start"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.command == Some(Command::Start)
    }

    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let greeting = format!(
            "Hello, {}, please choose command from the menu",
            message.display_name()
        );
        self.bot
            .send_keyboard_prompt(
                &message.chat,
                &greeting,
                &[KeyboardButton::location("send location")],
            )
            .await?;
        self.bot
            .send_text(&message.chat, &render_help(COMMANDS), TextFormat::Plain)
            .await?;
        Ok(HandlerResponse::Transition(Step::Idle))
    }
}

pub struct HelpHandler {
    bot: Arc<dyn Bot>,
}

impl HelpHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.command == Some(Command::Help)
    }

    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        self.bot
            .send_text(&message.chat, &render_help(COMMANDS), TextFormat::Plain)
            .await?;
        Ok(HandlerResponse::Stop)
    }
}

/// Aggregate statistics of the queries made by all users.
pub struct StatisticsHandler {
    bot: Arc<dyn Bot>,
    statistics: Arc<dyn StatisticsGateway>,
}

impl StatisticsHandler {
    pub fn new(bot: Arc<dyn Bot>, statistics: Arc<dyn StatisticsGateway>) -> Self {
        Self { bot, statistics }
    }
}

#[async_trait]
impl Handler for StatisticsHandler {
    fn name(&self) -> &'static str {
        "statistics"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.command == Some(Command::Statistics)
    }

    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let report = self.statistics.aggregate().await?;
        info!(user_id = message.user_id(), "Sending aggregate statistics");
        self.bot
            .send_text(&message.chat, &report, TextFormat::Html)
            .await?;
        Ok(HandlerResponse::Stop)
    }
}

pub struct ContactsHandler {
    bot: Arc<dyn Bot>,
    templates: Arc<dyn TemplateRenderer>,
}

impl ContactsHandler {
    pub fn new(bot: Arc<dyn Bot>, templates: Arc<dyn TemplateRenderer>) -> Self {
        Self { bot, templates }
    }
}

#[async_trait]
impl Handler for ContactsHandler {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.command == Some(Command::Contacts)
    }

    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let page = self
            .templates
            .render(CONTACTS_TEMPLATE, &[("user_name", message.display_name())])
            .await?;
        self.bot
            .send_text(&message.chat, &page, TextFormat::Html)
            .await?;
        Ok(HandlerResponse::Stop)
    }
}

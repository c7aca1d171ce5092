//! Per-country statistics: `/country` prompt, the typed country name, and location shares.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{
    Bot, Command, CountryLookup, Handler, HandlerError, HandlerResponse, Message, Result,
    StatisticsGateway, Step, TextFormat,
};
use tracing::{info, instrument};

/// Asks for a country name and waits for it.
pub struct CountryPromptHandler {
    bot: Arc<dyn Bot>,
}

impl CountryPromptHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for CountryPromptHandler {
    fn name(&self) -> &'static str {
        "country"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.command == Some(Command::Country)
    }

    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let prompt = format!("{}, write name of country please", message.display_name());
        self.bot
            .send_text(&message.chat, &prompt, TextFormat::Plain)
            .await?;
        Ok(HandlerResponse::Transition(Step::AwaitingCountryName))
    }
}

/// Free text received while waiting for a country name. Recognised commands never match, so
/// `/help` while waiting is still help.
pub struct CountryNameHandler {
    bot: Arc<dyn Bot>,
    statistics: Arc<dyn StatisticsGateway>,
}

impl CountryNameHandler {
    pub fn new(bot: Arc<dyn Bot>, statistics: Arc<dyn StatisticsGateway>) -> Self {
        Self { bot, statistics }
    }
}

#[async_trait]
impl Handler for CountryNameHandler {
    fn name(&self) -> &'static str {
        "country_name"
    }

    /// Any command-free text answers the prompt, blank text included; the trimmed (possibly
    /// empty) name is passed to the statistics service as is.
    fn matches(&self, message: &Message, step: Step) -> bool {
        step == Step::AwaitingCountryName && message.command.is_none() && message.text.is_some()
    }

    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let country = message.text().ok_or(HandlerError::NoText)?.trim();
        info!(user_id = message.user_id(), country = %country, "Country statistics requested");

        let report = self
            .statistics
            .by_country(country, message.display_name())
            .await?;
        self.bot
            .send_text(&message.chat, &report, TextFormat::Html)
            .await?;
        Ok(HandlerResponse::Transition(Step::Idle))
    }
}

/// Location share (bare, or attached to `/location`): reverse-geocode, then country statistics.
pub struct LocationHandler {
    bot: Arc<dyn Bot>,
    countries: Arc<dyn CountryLookup>,
    statistics: Arc<dyn StatisticsGateway>,
}

impl LocationHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        countries: Arc<dyn CountryLookup>,
        statistics: Arc<dyn StatisticsGateway>,
    ) -> Self {
        Self {
            bot,
            countries,
            statistics,
        }
    }
}

#[async_trait]
impl Handler for LocationHandler {
    fn name(&self) -> &'static str {
        "location"
    }

    fn matches(&self, message: &Message, _step: Step) -> bool {
        message.location.is_some()
            && matches!(message.command, None | Some(Command::Location))
    }

    #[instrument(skip(self, message), fields(user_id = message.user_id()))]
    async fn handle(&self, message: &Message, _step: Step) -> Result<HandlerResponse> {
        let location = message.location.ok_or(HandlerError::NoLocation)?;
        let country = self
            .countries
            .resolve(location.latitude, location.longitude)
            .await?;
        info!(
            user_id = message.user_id(),
            country = %country.country_name,
            "Location resolved"
        );

        let report = self
            .statistics
            .by_country(&country.country_name, message.display_name())
            .await?;
        self.bot
            .send_text(&message.chat, &report, TextFormat::Html)
            .await?;
        Ok(HandlerResponse::Transition(Step::Idle))
    }
}

//! # Handlers for the statistics bot
//!
//! One [`dbot_core::Handler`] per command plus the step handler for the country name and the
//! catch-all fallback (unknown command / analytics gate). [`command_handlers`] returns them in
//! registry order; the fallback is registered separately so it is always tried last.

mod analytics_gate;
mod commands;
mod country;
mod fallback;
mod info;

#[cfg(test)]
mod test;

use std::sync::Arc;

use dbot_core::{
    AnalyticsBackend, Bot, CountryLookup, Handler, StatisticsGateway, TemplateRenderer,
};

pub use analytics_gate::AnalyticsGate;
pub use commands::{render_help, CommandSpec, COMMANDS, HELP_FOOTER, HELP_HEADER};
pub use country::{CountryNameHandler, CountryPromptHandler, LocationHandler};
pub use fallback::FallbackHandler;
pub use info::{ContactsHandler, HelpHandler, StartHandler, StatisticsHandler};

/// Template rendered by `/contacts` with `user_name`.
pub const CONTACTS_TEMPLATE: &str = "contacts";
/// Template rendered for unrecognised text with `text_command`.
pub const UNKNOWN_COMMAND_TEMPLATE: &str = "idunnocommand";

/// Collaborators shared by the handlers.
#[derive(Clone)]
pub struct Services {
    pub bot: Arc<dyn Bot>,
    pub countries: Arc<dyn CountryLookup>,
    pub statistics: Arc<dyn StatisticsGateway>,
    pub analytics: Arc<dyn AnalyticsBackend>,
    pub templates: Arc<dyn TemplateRenderer>,
}

/// Explicit command handlers first, then the step-based country-name handler.
pub fn command_handlers(services: &Services) -> Vec<Arc<dyn Handler>> {
    vec![
        Arc::new(StartHandler::new(services.bot.clone())),
        Arc::new(CountryPromptHandler::new(services.bot.clone())),
        Arc::new(LocationHandler::new(
            services.bot.clone(),
            services.countries.clone(),
            services.statistics.clone(),
        )),
        Arc::new(StatisticsHandler::new(
            services.bot.clone(),
            services.statistics.clone(),
        )),
        Arc::new(HelpHandler::new(services.bot.clone())),
        Arc::new(ContactsHandler::new(
            services.bot.clone(),
            services.templates.clone(),
        )),
        Arc::new(CountryNameHandler::new(
            services.bot.clone(),
            services.statistics.clone(),
        )),
    ]
}

/// The catch-all handler for idle free text.
pub fn fallback_handler(services: &Services, gate: AnalyticsGate) -> Arc<dyn Handler> {
    Arc::new(FallbackHandler::new(
        services.bot.clone(),
        services.templates.clone(),
        services.analytics.clone(),
        gate,
    ))
}

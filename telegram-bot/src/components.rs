//! Component factory: builds the collaborators and the handler chain from config. Isolates
//! assembly logic from the runner so tests can build the same chain with fakes.

use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_core::Bot;
use dbot_telegram::TelegramBotAdapter;
use handler_chain::HandlerChain;
use handlers::{command_handlers, fallback_handler, AnalyticsGate, Services};
use middleware::{LoggingMiddleware, PresenceMiddleware};
use storage::ConversationStateStore;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::services::{
    http_client, FileTemplateRenderer, GeoNamesCountryLookup, HttpAnalyticsBackend,
    HttpStatisticsGateway,
};

/// Everything run_bot needs besides the config.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub services: Services,
    pub states: Arc<ConversationStateStore>,
    pub gate: AnalyticsGate,
}

/// Builds the Telegram client, the HTTP collaborators, the template renderer and the state store.
#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let base = config.base();
    let services_config = config.services();

    let teloxide_bot = base.telegram().build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    std::fs::create_dir_all(&services_config.analytics_artifacts_dir).with_context(|| {
        format!(
            "Failed to create analytics artifacts directory {}",
            services_config.analytics_artifacts_dir.display()
        )
    })?;

    let client = http_client(services_config.http_timeout)?;
    let services = Services {
        bot,
        countries: Arc::new(GeoNamesCountryLookup::new(
            client.clone(),
            services_config.geonames_url.clone(),
            services_config.geonames_username.clone(),
        )),
        statistics: Arc::new(HttpStatisticsGateway::new(
            client.clone(),
            services_config.statistics_url.clone(),
        )),
        analytics: Arc::new(HttpAnalyticsBackend::new(
            client,
            services_config.analytics_url.clone(),
            services_config.analytics_artifacts_dir.clone(),
        )),
        templates: Arc::new(FileTemplateRenderer::new(
            services_config.templates_dir.clone(),
        )),
    };

    let states = Arc::new(match base.state_max_users {
        Some(max_users) => ConversationStateStore::with_max_users(max_users),
        None => ConversationStateStore::new(),
    });

    let gate = config.gate.gate();
    info!(
        analytics_enabled = gate.is_enabled(),
        state_max_users = ?base.state_max_users,
        "Bot components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        services,
        states,
        gate,
    })
}

/// Logging and presence middleware around the registry: commands, the country-name step, then
/// the fallback.
pub fn build_handler_chain(
    services: &Services,
    states: Arc<ConversationStateStore>,
    gate: AnalyticsGate,
) -> HandlerChain {
    let chain = HandlerChain::new(states)
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(PresenceMiddleware::new(services.bot.clone())));
    command_handlers(services)
        .into_iter()
        .fold(chain, |chain, handler| chain.add_handler(handler))
        .set_fallback(fallback_handler(services, gate))
}

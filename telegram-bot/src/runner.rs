use anyhow::{Context, Result};
use dbot_core::init_tracing;
use dbot_telegram::{register_webhook, run_repl, serve_webhook, MessageProcessor};
use teloxide::prelude::*;
use tracing::{info, instrument};

use super::components::{build_bot_components, build_handler_chain};
use super::config::BotConfig;

/// Main entry: validate config, init logging, build components and the chain, then either
/// register the webhook and serve it or, with `polling`, run the long-polling REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, polling: bool) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let components = build_bot_components(&config)?;
    let chain = build_handler_chain(
        &components.services,
        components.states.clone(),
        components.gate.clone(),
    );
    info!(handlers = ?chain.handler_names(), "Handler chain built");

    let processor = MessageProcessor::new(chain, components.services.bot.clone())
        .with_reply_on_failure(config.base().reply_on_failure);
    let bot = components.teloxide_bot;

    if polling {
        bot.delete_webhook()
            .await
            .context("Failed to delete webhook before polling")?;
        info!("Bot started (long polling)");
        return run_repl(bot, processor).await;
    }

    let webhook = config.base().webhook();
    register_webhook(&bot, config.bot_token(), &webhook).await?;
    info!(addr = %webhook.listen_addr, "Bot started (webhook)");
    serve_webhook(config.bot_token(), processor, &webhook).await
}

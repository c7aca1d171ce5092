//! Command line: `dbot run [--token T] [--polling]`. Everything else comes from the environment.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "dbot")]
#[command(about = "COVID statistics Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Use long polling instead of the webhook server (local development).
        #[arg(long)]
        polling: bool,
    },
}

/// Loads config from env, with an optional token override.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

//! # COVID statistics bot application
//!
//! Wires storage (conversation state), handler-chain, middleware, handlers and dbot-telegram
//! (webhook ingress, polling). Loads config from env and serves the webhook.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;
pub mod services;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, GateConfig, ServicesConfig};
pub use runner::run_bot;

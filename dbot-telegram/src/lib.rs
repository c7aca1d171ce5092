//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation, webhook ingress (axum),
//! polling REPL runner, and the per-update guard that isolates one failing update from the rest.
//! Handles only Telegram connectivity and handler-chain execution; no bot commands live here.

mod adapters;
mod bot_adapter;
mod config;
mod processor;
mod runner;
mod webhook;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, WebhookConfig};
pub use processor::{MessageProcessor, FAILURE_REPLY};
pub use runner::run_repl;
pub use webhook::{register_webhook, serve_webhook, update_to_message, webhook_router};

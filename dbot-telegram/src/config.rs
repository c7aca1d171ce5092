//! Minimal transport config: token, API URL, and the webhook endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Telegram connectivity only.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Overrides the Bot API base URL (local Bot API server, test doubles).
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Uses the given token, default API URL.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Builds the teloxide client, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(&self.bot_token);
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("invalid Telegram API URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

/// Where the ingress listens and what gets registered with Telegram.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub listen_addr: SocketAddr,
    /// Public base URL; the webhook is `{server_url}/{token}`. None leaves registration alone.
    pub server_url: Option<String>,
    /// Self-signed public certificate uploaded with setWebhook.
    pub certificate: Option<PathBuf>,
}

impl WebhookConfig {
    pub fn new(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            server_url: None,
            certificate: None,
        }
    }

    /// `{server_url}/{token}`, or None when no public URL is configured.
    pub fn webhook_url(&self, token: &str) -> Result<Option<reqwest::Url>> {
        let Some(base) = &self.server_url else {
            return Ok(None);
        };
        let url = format!("{}/{}", base.trim_end_matches('/'), token);
        let url = reqwest::Url::parse(&url)
            .with_context(|| format!("invalid webhook URL built from SERVER_URL: {}", base))?;
        Ok(Some(url))
    }
}

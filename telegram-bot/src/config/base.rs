//! Base config: Telegram Bot connection, webhook endpoint, logging, dispatch. Loaded from env.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use dbot_telegram::{TelegramConfig, WebhookConfig};

/// Base config: Telegram-related, logging, and how updates are processed.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN (or API_BOT_TOKEN)
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// SERVER_URL: public base URL the webhook is registered under
    pub server_url: Option<String>,
    /// WEBHOOK_SSL_CERT: public certificate uploaded with setWebhook
    pub webhook_ssl_cert: Option<PathBuf>,
    /// LISTEN_ADDR
    pub listen_addr: IpAddr,
    /// PORT
    pub port: u16,
    /// REPLY_ON_FAILURE: tell the user when their update failed
    pub reply_on_failure: bool,
    /// STATE_MAX_USERS: bound on conversation state entries; None is unbounded
    pub state_max_users: Option<usize>,
}

/// Parses an optional env var, failing on a present but malformed value.
pub(crate) fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        _ => Ok(None),
    }
}

/// Optional non-empty string var.
pub(crate) fn string_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => string_var("BOT_TOKEN")
                .or_else(|| string_var("API_BOT_TOKEN"))
                .context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = string_var("TELEGRAM_API_URL").or_else(|| string_var("TELOXIDE_API_URL"));
        let log_file = string_var("LOG_FILE").unwrap_or_else(|| "logs/telegram-bot.log".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            server_url: string_var("SERVER_URL"),
            webhook_ssl_cert: string_var("WEBHOOK_SSL_CERT").map(PathBuf::from),
            listen_addr: parse_var("LISTEN_ADDR")?.unwrap_or(IpAddr::from([0, 0, 0, 0])),
            port: parse_var("PORT")?.unwrap_or(8443),
            reply_on_failure: parse_var("REPLY_ON_FAILURE")?.unwrap_or(true),
            state_max_users: parse_var("STATE_MAX_USERS")?,
        })
    }

    /// Validate config (e.g. URLs must parse if set, certificate must exist).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        self.webhook().webhook_url(&self.bot_token)?;
        if let Some(ref cert) = self.webhook_ssl_cert {
            if !cert.is_file() {
                anyhow::bail!("WEBHOOK_SSL_CERT does not point to a file: {}", cert.display());
            }
        }
        if self.state_max_users == Some(0) {
            anyhow::bail!("STATE_MAX_USERS must be at least 1");
        }
        Ok(())
    }

    pub fn telegram(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.bot_token.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
        }
    }

    pub fn webhook(&self) -> WebhookConfig {
        WebhookConfig {
            listen_addr: SocketAddr::new(self.listen_addr, self.port),
            server_url: self.server_url.clone(),
            certificate: self.webhook_ssl_cert.clone(),
        }
    }
}

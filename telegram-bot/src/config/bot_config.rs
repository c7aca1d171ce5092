//! BotConfig: BaseConfig + ServicesConfig + GateConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, GateConfig, ServicesConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub services: ServicesConfig,
    pub gate: GateConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            services: ServicesConfig::from_env()?,
            gate: GateConfig::from_env()?,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.services.validate()?;
        self.gate.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn services(&self) -> &ServicesConfig {
        &self.services
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}

//! Bot configuration: BaseConfig (Telegram + webhook + log) + ServicesConfig (collaborators) +
//! GateConfig (analytics secret).

mod base;
mod bot_config;
mod services;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use services::{GateConfig, ServicesConfig};

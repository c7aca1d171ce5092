//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "API_BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "SERVER_URL",
    "WEBHOOK_SSL_CERT",
    "LISTEN_ADDR",
    "PORT",
    "REPLY_ON_FAILURE",
    "STATE_MAX_USERS",
    "GEONAMES_URL",
    "GEONAMES_USERNAME",
    "STATISTICS_URL",
    "ANALYTICS_URL",
    "ANALYTICS_ARTIFACTS_DIR",
    "TEMPLATES_DIR",
    "HTTP_TIMEOUT_SECS",
    "PASS_CHAR_COUNT",
    "STAT_KEY",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/telegram-bot.log");
    assert!(config.base.server_url.is_none());
    assert_eq!(config.base.webhook().listen_addr.to_string(), "0.0.0.0:8443");
    assert!(config.base.reply_on_failure);
    assert!(config.base.state_max_users.is_none());
    assert_eq!(config.services.geonames_url, "http://api.geonames.org");
    assert_eq!(config.services.geonames_username, "demo");
    assert_eq!(config.services.statistics_url, "http://localhost:8000");
    assert_eq!(config.services.templates_dir.to_str(), Some("templates"));
    assert_eq!(config.services.http_timeout, Duration::from_secs(30));
    assert!(!config.gate.gate().is_enabled());
    config.validate().unwrap();

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("API_BOT_TOKEN", "legacy_token");
    env::set_var("PORT", "9000");
    env::set_var("LISTEN_ADDR", "127.0.0.1");
    env::set_var("SERVER_URL", "https://bot.example.com");
    env::set_var("REPLY_ON_FAILURE", "false");
    env::set_var("STATE_MAX_USERS", "1000");
    env::set_var("HTTP_TIMEOUT_SECS", "5");
    env::set_var("PASS_CHAR_COUNT", "4");
    env::set_var("STAT_KEY", "k3y!");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "legacy_token");
    assert_eq!(config.base.webhook().listen_addr.to_string(), "127.0.0.1:9000");
    assert_eq!(
        config
            .base
            .webhook()
            .webhook_url("legacy_token")
            .unwrap()
            .unwrap()
            .as_str(),
        "https://bot.example.com/legacy_token"
    );
    assert!(!config.base.reply_on_failure);
    assert_eq!(config.base.state_max_users, Some(1000));
    assert_eq!(config.services.http_timeout, Duration::from_secs(5));
    assert!(config.gate.gate().is_enabled());
    config.validate().unwrap();

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_malformed_number_is_an_error() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("PORT", "eighty");

    assert!(BotConfig::load(None).is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

/// **Test: A key whose length differs from PASS_CHAR_COUNT fails validation.**
#[test]
#[serial]
fn test_validate_stat_key_length_mismatch() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("PASS_CHAR_COUNT", "5");
    env::set_var("STAT_KEY", "k3y!");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

/// **Test: Only one of PASS_CHAR_COUNT / STAT_KEY leaves the gate disabled.**
#[test]
#[serial]
fn test_partial_gate_config_disables_gate() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("STAT_KEY", "k3y!");

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();
    assert!(!config.gate.gate().is_enabled());
    assert!(!format!("{:?}", config.gate).contains("k3y!"));

    clear_env();
}

#[test]
#[serial]
fn test_validate_missing_certificate() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("WEBHOOK_SSL_CERT", "/nonexistent/cert.pem");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

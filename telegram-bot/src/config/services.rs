//! Collaborator endpoints and the analytics gate secret.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use handlers::AnalyticsGate;

use super::base::{parse_var, string_var};

/// Where the collaborator HTTP services and the templates live.
#[derive(Debug, Clone)]
pub struct ServicesConfig {
    /// GEONAMES_URL
    pub geonames_url: String,
    /// GEONAMES_USERNAME
    pub geonames_username: String,
    /// STATISTICS_URL
    pub statistics_url: String,
    /// ANALYTICS_URL
    pub analytics_url: String,
    /// ANALYTICS_ARTIFACTS_DIR: where per-user `{uid}.txt` reports are written
    pub analytics_artifacts_dir: PathBuf,
    /// TEMPLATES_DIR
    pub templates_dir: PathBuf,
    /// HTTP_TIMEOUT_SECS
    pub http_timeout: Duration,
}

impl ServicesConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            geonames_url: string_var("GEONAMES_URL")
                .unwrap_or_else(|| "http://api.geonames.org".to_string()),
            geonames_username: string_var("GEONAMES_USERNAME").unwrap_or_else(|| "demo".to_string()),
            statistics_url: string_var("STATISTICS_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            analytics_url: string_var("ANALYTICS_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            analytics_artifacts_dir: string_var("ANALYTICS_ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            templates_dir: string_var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("templates")),
            http_timeout: Duration::from_secs(parse_var("HTTP_TIMEOUT_SECS")?.unwrap_or(30)),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("GEONAMES_URL", &self.geonames_url),
            ("STATISTICS_URL", &self.statistics_url),
            ("ANALYTICS_URL", &self.analytics_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        Ok(())
    }
}

/// PASS_CHAR_COUNT / STAT_KEY. The gate is disabled unless both are set.
#[derive(Clone)]
pub struct GateConfig {
    pub pass_char_count: Option<usize>,
    pub stat_key: Option<String>,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("pass_char_count", &self.pass_char_count)
            .field("stat_key", &self.stat_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

impl GateConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            pass_char_count: parse_var("PASS_CHAR_COUNT")?,
            // The key is compared verbatim, so it is not trimmed.
            stat_key: std::env::var("STAT_KEY").ok().filter(|s| !s.is_empty()),
        })
    }

    /// The key must be exactly `pass_char_count` characters.
    pub fn validate(&self) -> Result<()> {
        if let (Some(count), Some(key)) = (self.pass_char_count, &self.stat_key) {
            let key_chars = key.chars().count();
            if key_chars != count {
                anyhow::bail!(
                    "STAT_KEY has {} characters but PASS_CHAR_COUNT is {}",
                    key_chars,
                    count
                );
            }
        }
        Ok(())
    }

    pub fn gate(&self) -> AnalyticsGate {
        match (self.pass_char_count, &self.stat_key) {
            (Some(count), Some(key)) => AnalyticsGate::new(count, key.clone()),
            _ => AnalyticsGate::disabled(),
        }
    }
}

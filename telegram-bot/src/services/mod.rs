//! Collaborator implementations: thin HTTP clients plus the file template renderer.
//!
//! These only move data between the bot and the external services; formatting of statistics
//! and analytics happens on the service side.

mod analytics;
mod geonames;
mod statistics;
mod templates;

use std::time::Duration;

use anyhow::{Context, Result};

pub use analytics::HttpAnalyticsBackend;
pub use geonames::GeoNamesCountryLookup;
pub use statistics::HttpStatisticsGateway;
pub use templates::FileTemplateRenderer;

/// Shared reqwest client for all collaborators.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Joins a base URL and a path without doubling or dropping the slash.
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

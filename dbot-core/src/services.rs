//! Collaborator traits the handlers depend on but do not implement.
//!
//! Implementations live in the application crate (HTTP clients, file templates); tests use
//! in-memory fakes. Failures are reported as [`crate::ServiceError`] wrapped in [`crate::DbotError`].

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::UserId;

/// Country resolved from a location fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub country_name: String,
    pub country_code: Option<String>,
}

/// Reverse geocoding: coordinates to country.
#[async_trait]
pub trait CountryLookup: Send + Sync {
    /// Fails with `ServiceError::Lookup` when the coordinates resolve to no country.
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<CountryInfo>;
}

/// Formatted (HTML) statistics replies.
#[async_trait]
pub trait StatisticsGateway: Send + Sync {
    /// Statistics for one country, recorded as a query by `requester`.
    async fn by_country(&self, country_name: &str, requester: &str) -> Result<String>;

    /// Statistics of the queries made by all users.
    async fn aggregate(&self) -> Result<String>;
}

/// Output mode of an analytics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsMode {
    Inline,
    File,
}

/// Parsed analytics request from the admin channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub user_id: UserId,
    pub tokens: Vec<String>,
    pub mode: AnalyticsMode,
}

/// Result of an analytics query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsReport {
    /// Text to send as a message.
    Inline(String),
    /// Per-user artifact on disk; remove it with [`AnalyticsBackend::cleanup`] once sent.
    File(PathBuf),
}

#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    async fn run_query(&self, query: &AnalyticsQuery) -> Result<AnalyticsReport>;

    /// Removes any artifact produced for `user_id`. Missing artifacts are not an error.
    async fn cleanup(&self, user_id: UserId) -> Result<()>;
}

/// Named HTML templates with `{{ key }}` placeholders.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Fails with `ServiceError::TemplateNotFound` for unknown names.
    async fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String>;
}

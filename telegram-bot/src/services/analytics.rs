//! Analytics service client. File-mode reports are written to `{artifacts_dir}/{uid}.txt`.

use std::path::PathBuf;

use async_trait::async_trait;
use dbot_core::{
    AnalyticsBackend, AnalyticsMode, AnalyticsQuery, AnalyticsReport, Result, ServiceError, UserId,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::endpoint;

#[derive(Serialize)]
struct AnalyticsRequest<'a> {
    tokens: &'a [String],
    user_id: UserId,
}

pub struct HttpAnalyticsBackend {
    client: reqwest::Client,
    base_url: String,
    artifacts_dir: PathBuf,
}

impl HttpAnalyticsBackend {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        artifacts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            artifacts_dir: artifacts_dir.into(),
        }
    }

    pub fn artifact_path(&self, user_id: UserId) -> PathBuf {
        self.artifacts_dir.join(format!("{}.txt", user_id))
    }
}

#[async_trait]
impl AnalyticsBackend for HttpAnalyticsBackend {
    #[instrument(skip(self, query), fields(user_id = query.user_id, mode = ?query.mode))]
    async fn run_query(&self, query: &AnalyticsQuery) -> Result<AnalyticsReport> {
        let unavailable = |e: reqwest::Error| ServiceError::BackendUnavailable(e.to_string());
        let report = self
            .client
            .post(endpoint(&self.base_url, "analytics"))
            .json(&AnalyticsRequest {
                tokens: &query.tokens,
                user_id: query.user_id,
            })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?
            .text()
            .await
            .map_err(unavailable)?;

        match query.mode {
            AnalyticsMode::Inline => Ok(AnalyticsReport::Inline(report)),
            AnalyticsMode::File => {
                let path = self.artifact_path(query.user_id);
                tokio::fs::write(&path, report).await?;
                info!(path = %path.display(), "Analytics report written");
                Ok(AnalyticsReport::File(path))
            }
        }
    }

    async fn cleanup(&self, user_id: UserId) -> Result<()> {
        let path = self.artifact_path(user_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Analytics report removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! Statistics service client. Replies come back already formatted (HTML).

use async_trait::async_trait;
use dbot_core::{Result, ServiceError, StatisticsGateway};
use tracing::instrument;

use super::endpoint;

pub struct HttpStatisticsGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatisticsGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let unavailable = |e: reqwest::Error| ServiceError::BackendUnavailable(e.to_string());
        let response = self
            .client
            .get(endpoint(&self.base_url, path))
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;
        Ok(response.text().await.map_err(unavailable)?)
    }
}

#[async_trait]
impl StatisticsGateway for HttpStatisticsGateway {
    #[instrument(skip(self))]
    async fn by_country(&self, country_name: &str, requester: &str) -> Result<String> {
        self.fetch(
            "statistics/country",
            &[("name", country_name), ("user", requester)],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn aggregate(&self) -> Result<String> {
        self.fetch("statistics/queries", &[]).await
    }
}

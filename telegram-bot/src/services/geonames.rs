//! Reverse geocoding through the GeoNames `countryCodeJSON` endpoint.

use async_trait::async_trait;
use dbot_core::{CountryInfo, CountryLookup, Result, ServiceError};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::endpoint;

/// GeoNames answers 200 for errors too, with a `status` object instead of the country.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryCodeResponse {
    country_name: Option<String>,
    country_code: Option<String>,
    status: Option<GeoNamesStatus>,
}

#[derive(Debug, Deserialize)]
struct GeoNamesStatus {
    message: Option<String>,
}

pub struct GeoNamesCountryLookup {
    client: reqwest::Client,
    base_url: String,
    username: String,
}

impl GeoNamesCountryLookup {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            username: username.into(),
        }
    }
}

#[async_trait]
impl CountryLookup for GeoNamesCountryLookup {
    #[instrument(skip(self))]
    async fn resolve(&self, latitude: f64, longitude: f64) -> Result<CountryInfo> {
        let lookup_err = |e: reqwest::Error| ServiceError::Lookup(e.to_string());

        let response = self
            .client
            .get(endpoint(&self.base_url, "countryCodeJSON"))
            .query(&[
                ("lat", latitude.to_string()),
                ("lng", longitude.to_string()),
                ("username", self.username.clone()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(lookup_err)?;
        let body: CountryCodeResponse = response.json().await.map_err(lookup_err)?;
        debug!(response = ?body, "GeoNames response");

        if let Some(status) = body.status {
            return Err(ServiceError::Lookup(
                status
                    .message
                    .unwrap_or_else(|| "GeoNames returned an error status".to_string()),
            )
            .into());
        }
        match body.country_name {
            Some(country_name) if !country_name.is_empty() => Ok(CountryInfo {
                country_name,
                country_code: body.country_code,
            }),
            _ => Err(ServiceError::Lookup(format!(
                "no country at {}, {}",
                latitude, longitude
            ))
            .into()),
        }
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use salesq_core::config::AppConfig;
use salesq_core::{PipelineError, SapCredentials};
use secrecy::ExposeSecret;
use serde_json::Value;

/// Authenticated read access to the SAP OData gateway.
#[async_trait]
pub trait ODataClient: Send + Sync {
    /// GETs `url` and returns the decoded JSON body, untyped.
    async fn get_json(&self, url: &str, credentials: &SapCredentials)
        -> Result<Value, PipelineError>;
}

#[derive(Clone, Debug)]
pub struct SapODataClient {
    client: Client,
    preference: String,
}

impl SapODataClient {
    pub fn new(preference: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| PipelineError::http(format!("failed to build client: {error}")))?;

        Ok(Self { client, preference: preference.into() })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Self::new(config.odata_preference(), Duration::from_secs(config.sap.timeout_secs))
    }
}

#[async_trait]
impl ODataClient for SapODataClient {
    async fn get_json(
        &self,
        url: &str,
        credentials: &SapCredentials,
    ) -> Result<Value, PipelineError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(credentials.password.expose_secret()))
            .header("Prefer", &self.preference)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(PipelineError::http)?
            .error_for_status()
            .map_err(PipelineError::http)?;

        response
            .json::<Value>()
            .await
            .map_err(|error| PipelineError::http(format!("response body is not JSON: {error}")))
    }
}

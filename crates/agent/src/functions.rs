use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use salesq_core::config::FunctionsConfig;
use salesq_core::{InvocationResponse, PipelineError};
use serde_json::Value;

/// Synchronous request/response call into another function.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Returns the raw result payload of the invoked function.
    async fn invoke(&self, function_name: &str, payload: &Value) -> Result<Value, PipelineError>;
}

/// Reads the URL out of a URL generator result payload.
pub fn generated_url(payload: Value) -> Result<String, PipelineError> {
    let result: InvocationResponse = serde_json::from_value(payload).map_err(|error| {
        PipelineError::downstream(format!("could not decode invocation payload: {error}"))
    })?;

    if !result.is_success() {
        let reason = result.error_message().unwrap_or("no error message");
        return Err(PipelineError::downstream(format!(
            "URL generator returned status {}: {reason}",
            result.status_code
        )));
    }

    match result.body {
        Value::String(url) if !url.trim().is_empty() => Ok(url),
        Value::String(_) | Value::Null => {
            Err(PipelineError::downstream("Empty OData URL received"))
        }
        _ => Err(PipelineError::downstream("URL generator body is not a string")),
    }
}

/// Invokes functions hosted by `salesq-server` through
/// `POST {endpoint}/functions/{name}/invocations`.
#[derive(Clone, Debug)]
pub struct HttpFunctionInvoker {
    client: Client,
    endpoint: String,
}

impl HttpFunctionInvoker {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            PipelineError::downstream(format!("failed to build client: {error}"))
        })?;

        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn from_config(config: &FunctionsConfig) -> Result<Self, PipelineError> {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl FunctionInvoker for HttpFunctionInvoker {
    async fn invoke(&self, function_name: &str, payload: &Value) -> Result<Value, PipelineError> {
        let url =
            format!("{}/functions/{function_name}/invocations", self.endpoint.trim_end_matches('/'));

        let response =
            self.client.post(url).json(payload).send().await.map_err(PipelineError::downstream)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::downstream(format!(
                "invocation of `{function_name}` returned {status}"
            )));
        }

        response.json::<Value>().await.map_err(|error| {
            PipelineError::downstream(format!("could not decode invocation payload: {error}"))
        })
    }
}

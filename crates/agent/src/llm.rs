use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use salesq_core::config::LlmConfig;
use salesq_core::PipelineError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::transport::error_detail;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Sampling settings for one model call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InferenceParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl InferenceParams {
    /// URL synthesis: some variety is tolerated, output is a single short line.
    pub const URL_SYNTHESIS: Self = Self { temperature: 0.5, top_p: 0.9, max_tokens: 512 };
    /// Answer summarization: deterministic, long-form.
    pub const ANSWER: Self = Self { temperature: 0.0, top_p: 0.9, max_tokens: 5000 };
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Messages-API request body. Serializes to exactly what the runtime expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub anthropic_version: &'static str,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub top_p: f64,
    pub system: String,
}

impl GenerationRequest {
    /// Single user turn carrying the raw query, with the rendered instructions
    /// as the system block.
    pub fn new(system: String, query: &str, params: InferenceParams) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: params.max_tokens,
            messages: vec![ChatMessage::user(query)],
            temperature: params.temperature,
            top_p: params.top_p,
            system,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError>;
}

#[derive(Deserialize)]
struct InvokeModelResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Invokes a hosted model through `POST {endpoint}/model/{model}/invoke`,
/// authenticated with a bearer token when one is configured.
#[derive(Clone, Debug)]
pub struct BedrockClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<SecretString>,
}

impl BedrockClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| PipelineError::generation(format!("failed to build client: {error}")))?;

        Ok(Self { client, endpoint: endpoint.into(), model: model.into(), api_key })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, PipelineError> {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn invoke_url(&self) -> String {
        format!("{}/model/{}/invoke", self.endpoint.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl LlmClient for BedrockClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError> {
        let mut builder = self
            .client
            .post(self.invoke_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response = builder.send().await.map_err(PipelineError::generation)?;
        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(PipelineError::generation(format!(
                "model invocation returned {status}{detail}"
            )));
        }

        let body: InvokeModelResponse = response.json().await.map_err(|error| {
            PipelineError::generation(format!("could not decode model response: {error}"))
        })?;

        body.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| PipelineError::generation("model response did not contain text content"))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salesq_core::PipelineError;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{BedrockClient, GenerationRequest, InferenceParams, LlmClient};

    const MODEL: &str = "anthropic.claude-3-sonnet-20240229-v1:0";

    fn client(server: &MockServer) -> BedrockClient {
        BedrockClient::new(
            server.uri(),
            MODEL,
            Some(SecretString::from("test-bearer".to_string())),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    #[test]
    fn request_serializes_to_messages_body() {
        let request = GenerationRequest::new(
            "system block".to_string(),
            "Share Sales Order details with sales order id 48",
            InferenceParams::URL_SYNTHESIS,
        );

        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 512,
                "messages": [
                    { "role": "user", "content": "Share Sales Order details with sales order id 48" }
                ],
                "temperature": 0.5,
                "top_p": 0.9,
                "system": "system block"
            })
        );
    }

    #[tokio::test]
    async fn generate_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/model/{MODEL}/invoke")))
            .and(header("authorization", "Bearer test-bearer"))
            .and(body_partial_json(json!({ "max_tokens": 5000, "temperature": 0.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": "Sales order 48 is fully delivered." }],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            GenerationRequest::new("ctx".to_string(), "status of 48?", InferenceParams::ANSWER);
        let answer = client(&server).generate(&request).await.expect("generation succeeds");

        assert_eq!(answer, "Sales order 48 is fully delivered.");
    }

    #[tokio::test]
    async fn empty_content_is_a_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
            .mount(&server)
            .await;

        let request =
            GenerationRequest::new("ctx".to_string(), "q", InferenceParams::URL_SYNTHESIS);
        let error = client(&server).generate(&request).await.expect_err("no text block");

        assert_eq!(
            error,
            PipelineError::generation("model response did not contain text content")
        );
    }

    #[tokio::test]
    async fn throttling_is_reported_with_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({ "message": "Too many requests, please wait" })),
            )
            .mount(&server)
            .await;

        let request =
            GenerationRequest::new("ctx".to_string(), "q", InferenceParams::URL_SYNTHESIS);
        let error = client(&server).generate(&request).await.expect_err("throttled");

        assert!(matches!(error, PipelineError::Generation(_)));
        assert!(error.to_string().contains("429"));
        assert!(error.to_string().contains("Too many requests"));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use salesq_core::config::KnowledgeBaseConfig;
use salesq_core::PipelineError;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::transport::error_detail;

/// Vector search over the OData schema documentation.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Returns snippet texts in relevance order.
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        number_of_results: u32,
    ) -> Result<Vec<String>, PipelineError>;
}

/// Joins snippets with single spaces, preserving retrieval order.
pub fn join_contexts(snippets: &[String]) -> String {
    snippets.join(" ")
}

/// Extracts `retrievalResults[*].content.text`, rejecting any other shape.
pub fn parse_retrieval_results(body: &Value) -> Result<Vec<String>, PipelineError> {
    let results = body
        .get("retrievalResults")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::retrieval("response is missing retrievalResults"))?;

    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            result
                .get("content")
                .and_then(|content| content.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    PipelineError::retrieval(format!(
                        "Error processing retrieval results: result {index} has no content.text"
                    ))
                })
        })
        .collect()
}

/// Knowledge-base retrieval over `POST {endpoint}/knowledgebases/{id}/retrieve`.
#[derive(Clone, Debug)]
pub struct KnowledgeBaseClient {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl KnowledgeBaseClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| PipelineError::retrieval(format!("failed to build client: {error}")))?;

        Ok(Self { client, endpoint: endpoint.into(), api_key })
    }

    pub fn from_config(config: &KnowledgeBaseConfig) -> Result<Self, PipelineError> {
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl KnowledgeBase for KnowledgeBaseClient {
    async fn retrieve(
        &self,
        knowledge_base_id: &str,
        query: &str,
        number_of_results: u32,
    ) -> Result<Vec<String>, PipelineError> {
        let url = format!(
            "{}/knowledgebases/{knowledge_base_id}/retrieve",
            self.endpoint.trim_end_matches('/')
        );
        let payload = json!({
            "retrievalQuery": { "text": query },
            "retrievalConfiguration": {
                "vectorSearchConfiguration": { "numberOfResults": number_of_results }
            }
        });

        let mut builder = self.client.post(url).json(&payload);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response = builder.send().await.map_err(PipelineError::retrieval)?;
        let status = response.status();
        if !status.is_success() {
            let detail = error_detail(response).await;
            return Err(PipelineError::retrieval(format!("retrieve returned {status}{detail}")));
        }

        let body: Value = response.json().await.map_err(|error| {
            PipelineError::retrieval(format!("could not decode retrieve response: {error}"))
        })?;
        parse_retrieval_results(&body)
    }
}

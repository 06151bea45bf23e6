use salesq_core::config::AppConfig;
use salesq_core::{FunctionKind, InvocationResponse, PipelineError, UrlGenerationEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::collaborators::UrlGeneratorCollaborators;
use crate::llm::{GenerationRequest, InferenceParams};
use crate::prompts::ODATA_URL;
use crate::retrieval::join_contexts;
use crate::secrets::system_details;

/// Host and model output are joined as-is; the result is not validated as a URL.
pub fn compose_url(host: &str, path: &str) -> String {
    format!("{host}{path}")
}

pub struct UrlGenerator<'a> {
    config: &'a AppConfig,
    collaborators: &'a UrlGeneratorCollaborators,
}

impl<'a> UrlGenerator<'a> {
    pub fn new(config: &'a AppConfig, collaborators: &'a UrlGeneratorCollaborators) -> Self {
        Self { config, collaborators }
    }

    pub async fn handle(&self, event: &Value, invocation_id: &str) -> InvocationResponse {
        let result = match UrlGenerationEvent::parse(event) {
            Ok(event) => self.generate(&event.query, invocation_id).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(url) => {
                info!(
                    event_name = "function.url_generator.completed",
                    invocation_id,
                    url_length = url.len(),
                    "odata url generated"
                );
                InvocationResponse::ok(url)
            }
            Err(error) => render_failure(self.config, &error, invocation_id),
        }
    }

    pub async fn generate(&self, query: &str, invocation_id: &str) -> Result<String, PipelineError> {
        let details =
            system_details(self.collaborators.secrets.as_ref(), &self.config.secrets.secret_id)
                .await?;
        let host = details.host()?;

        let snippets = self
            .collaborators
            .knowledge_base
            .retrieve(
                &self.config.knowledge_base.id,
                query,
                self.config.knowledge_base.number_of_results,
            )
            .await?;
        info!(
            event_name = "function.url_generator.context_retrieved",
            invocation_id,
            snippet_count = snippets.len(),
            "schema context retrieved"
        );

        let context = join_contexts(&snippets);
        let system = ODATA_URL
            .render(&[("context", context.as_str())])
            .map_err(PipelineError::generation)?;
        let request = GenerationRequest::new(system, query, InferenceParams::URL_SYNTHESIS);
        let path = self.collaborators.llm.generate(&request).await?;

        Ok(compose_url(host, &path))
    }
}

/// Builds this invocation's collaborators from `config` and runs the generator.
pub async fn invoke(config: &AppConfig, event: &Value, invocation_id: &str) -> InvocationResponse {
    match UrlGeneratorCollaborators::from_config(config) {
        Ok(collaborators) => UrlGenerator::new(config, &collaborators).handle(event, invocation_id).await,
        Err(error) => render_failure(config, &error, invocation_id),
    }
}

fn render_failure(config: &AppConfig, failure: &PipelineError, invocation_id: &str) -> InvocationResponse {
    if failure.is_input() {
        warn!(
            event_name = "function.url_generator.rejected",
            invocation_id,
            error = %failure,
            "url generator input rejected"
        );
    } else {
        error!(
            event_name = "function.url_generator.failed",
            invocation_id,
            error_class = failure.class(),
            error = %failure,
            "url generator failed"
        );
    }

    InvocationResponse::from_error(
        FunctionKind::UrlGenerator,
        failure,
        config.response.include_error_detail,
    )
}

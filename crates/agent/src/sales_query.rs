use salesq_core::config::AppConfig;
use salesq_core::{ActionEvent, ActionResponse, FunctionKind, InvocationResponse, PipelineError};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::collaborators::SalesQueryCollaborators;
use crate::functions::generated_url;
use crate::llm::{GenerationRequest, InferenceParams};
use crate::prompts::SALES_ANSWER;
use crate::secrets::system_details;

pub struct SalesQueryHandler<'a> {
    config: &'a AppConfig,
    collaborators: &'a SalesQueryCollaborators,
}

impl<'a> SalesQueryHandler<'a> {
    pub fn new(config: &'a AppConfig, collaborators: &'a SalesQueryCollaborators) -> Self {
        Self { config, collaborators }
    }

    pub async fn handle(&self, event: &Value, invocation_id: &str) -> InvocationResponse {
        let result = match ActionEvent::parse(event) {
            Ok(event) => self.answer(&event, invocation_id).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(response) => {
                info!(
                    event_name = "function.sales_query.completed",
                    invocation_id,
                    action_group = %response.response.action_group,
                    function = %response.response.function,
                    "sales query answered"
                );
                InvocationResponse::ok(response)
            }
            Err(error) => render_failure(self.config, &error, invocation_id),
        }
    }

    pub async fn answer(
        &self,
        event: &ActionEvent,
        invocation_id: &str,
    ) -> Result<ActionResponse, PipelineError> {
        info!(
            event_name = "function.sales_query.started",
            invocation_id,
            agent = %event.agent,
            action_group = %event.action_group,
            "sales query received"
        );

        let details =
            system_details(self.collaborators.secrets.as_ref(), &self.config.secrets.secret_id)
                .await?;
        let credentials = details.credentials()?;

        let url = self.request_url(&event.input_text).await?;
        info!(event_name = "function.sales_query.url_generated", invocation_id, "odata url received");

        let payload = self.collaborators.odata.get_json(&url, &credentials).await?;
        let context = payload.to_string();
        info!(
            event_name = "function.sales_query.payload_fetched",
            invocation_id,
            payload_bytes = context.len(),
            "sap payload fetched"
        );

        let system = SALES_ANSWER
            .render(&[("context", context.as_str())])
            .map_err(PipelineError::generation)?;
        let request = GenerationRequest::new(system, &event.input_text, InferenceParams::ANSWER);
        let answer = self.collaborators.llm.generate(&request).await?;

        Ok(ActionResponse::for_answer(event, &answer))
    }

    async fn request_url(&self, query: &str) -> Result<String, PipelineError> {
        let payload = self
            .collaborators
            .functions
            .invoke(&self.config.functions.url_generator, &json!({ "query": query }))
            .await?;
        generated_url(payload)
    }
}

/// Builds this invocation's collaborators from `config` and runs the handler.
pub async fn invoke(config: &AppConfig, event: &Value, invocation_id: &str) -> InvocationResponse {
    match SalesQueryCollaborators::from_config(config) {
        Ok(collaborators) => {
            SalesQueryHandler::new(config, &collaborators).handle(event, invocation_id).await
        }
        Err(error) => render_failure(config, &error, invocation_id),
    }
}

fn render_failure(config: &AppConfig, failure: &PipelineError, invocation_id: &str) -> InvocationResponse {
    if failure.is_input() {
        warn!(
            event_name = "function.sales_query.rejected",
            invocation_id,
            error = %failure,
            "sales query input rejected"
        );
    } else {
        error!(
            event_name = "function.sales_query.failed",
            invocation_id,
            error_class = failure.class(),
            error = %failure,
            "sales query failed"
        );
    }

    InvocationResponse::from_error(FunctionKind::SalesQuery, failure, config.response.include_error_detail)
}

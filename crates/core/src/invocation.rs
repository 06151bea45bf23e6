//! Invocation contracts for the two functions.
//!
//! Events arrive as loose JSON and are validated field by field so that a
//! missing value produces an input error naming the field. Results always
//! carry a `statusCode` and a `body`, mirroring a synchronous function invoke.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::PipelineError;

pub const MESSAGE_VERSION: &str = "1.0";

/// Event accepted by the URL generator: `{"query": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlGenerationEvent {
    pub query: String,
}

impl UrlGenerationEvent {
    pub fn parse(event: &Value) -> Result<Self, PipelineError> {
        match event.get("query").and_then(Value::as_str) {
            Some(query) if !query.trim().is_empty() => Ok(Self { query: query.to_string() }),
            _ => Err(PipelineError::input("Query parameter is missing in the event")),
        }
    }
}

/// Event sent by the agent framework to the sales query handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub agent: String,
    pub action_group: String,
    pub function: String,
    pub input_text: String,
}

impl ActionEvent {
    pub fn parse(event: &Value) -> Result<Self, PipelineError> {
        let object = event
            .as_object()
            .ok_or_else(|| PipelineError::input("Event must be a JSON object"))?;

        Ok(Self {
            agent: required_string(object, "agent")?,
            action_group: required_string(object, "actionGroup")?,
            function: required_string(object, "function")?,
            input_text: required_string(object, "inputText")?,
        })
    }
}

fn required_string(object: &Map<String, Value>, field: &str) -> Result<String, PipelineError> {
    match object.get(field) {
        None | Some(Value::Null) => {
            Err(PipelineError::input(format!("Missing required field: {field}")))
        }
        Some(Value::String(value)) if value.trim().is_empty() => {
            Err(PipelineError::input(format!("Required field is empty: {field}")))
        }
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(PipelineError::input(format!("Required field must be a string: {field}"))),
    }
}

/// Nested reply shape expected by the invoking agent framework.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub message_version: String,
    pub response: FunctionResponse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub action_group: String,
    pub function: String,
    pub function_response: FunctionResponseBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponseBody {
    pub response_body: ResponseBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    pub body: String,
}

impl ActionResponse {
    /// Wraps an answer for the event it replies to. The answer is stored
    /// JSON-encoded, so a plain sentence arrives wrapped in quotes.
    pub fn for_answer(event: &ActionEvent, answer: &str) -> Self {
        let encoded = Value::String(answer.to_string()).to_string();
        Self {
            message_version: MESSAGE_VERSION.to_string(),
            response: FunctionResponse {
                action_group: event.action_group.clone(),
                function: event.function.clone(),
                function_response: FunctionResponseBody {
                    response_body: ResponseBody { text: TextBody { body: encoded } },
                },
            },
        }
    }
}

/// Which function is rendering an error. The two differ in how input
/// errors are worded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    UrlGenerator,
    SalesQuery,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: Value,
}

impl InvocationResponse {
    pub fn ok(body: impl Serialize) -> Self {
        let body = serde_json::to_value(body).unwrap_or_else(|error| {
            json!({ "error": format!("Internal server error: response serialization failed: {error}") })
        });
        Self { status_code: 200, body }
    }

    /// Renders a pipeline failure. Collaborator causes are only included when
    /// `include_detail` is set; input errors always carry their message.
    pub fn from_error(kind: FunctionKind, error: &PipelineError, include_detail: bool) -> Self {
        let message = match error {
            PipelineError::Input(message) => match kind {
                FunctionKind::UrlGenerator => message.clone(),
                FunctionKind::SalesQuery => format!("Invalid input: {message}"),
            },
            other if include_detail => format!("Internal server error: {other}"),
            other => format!("Internal server error: {}", other.summary()),
        };

        Self { status_code: error.status_code(), body: json!({ "error": message }) }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

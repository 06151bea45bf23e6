use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use salesq_agent::{sales_query, url_generator};
use salesq_core::config::AppConfig;
use salesq_core::InvocationResponse;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct FunctionState {
    config: Arc<AppConfig>,
}

pub fn router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/functions/{name}/invocations", post(invoke))
        .with_state(FunctionState { config })
}

/// Runs the named function synchronously. The transport status is 200
/// whenever a function ran; the outcome travels in the result's own
/// `statusCode`.
pub async fn invoke(
    State(state): State<FunctionState>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let config = state.config.as_ref();
    let invocation_id = Uuid::new_v4().to_string();
    let event = decode_event(&body, &invocation_id);

    info!(
        event_name = "system.functions.invoke",
        invocation_id = %invocation_id,
        function = %name,
        "function invocation received"
    );

    let result = if name == config.functions.url_generator {
        url_generator::invoke(config, &event, &invocation_id).await
    } else if name == config.functions.sales_query {
        sales_query::invoke(config, &event, &invocation_id).await
    } else {
        warn!(
            event_name = "system.functions.unknown",
            invocation_id = %invocation_id,
            function = %name,
            "unknown function requested"
        );
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Function not found: {name}") })),
        );
    };

    info!(
        event_name = "system.functions.completed",
        invocation_id = %invocation_id,
        function = %name,
        status_code = result.status_code,
        "function invocation completed"
    );
    (StatusCode::OK, Json(to_json(result)))
}

/// A body that is not a JSON document becomes `null`, which each function
/// rejects as invalid input.
fn decode_event(body: &[u8], invocation_id: &str) -> Value {
    match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(error) => {
            debug!(
                event_name = "system.functions.undecodable_body",
                invocation_id,
                error = %error,
                "request body is not JSON"
            );
            Value::Null
        }
    }
}

fn to_json(result: InvocationResponse) -> Value {
    json!({ "statusCode": result.status_code, "body": result.body })
}

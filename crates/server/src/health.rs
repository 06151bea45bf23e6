use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use salesq_agent::secrets::{store_from_config, system_details};
use salesq_core::config::AppConfig;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    config: Arc<AppConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub secrets: HealthCheck,
    pub checked_at: String,
}

pub fn router(config: Arc<AppConfig>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { config })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let secrets = secrets_check(&state.config).await;
    let ready = secrets.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: format!(
                "serving {} and {}",
                state.config.functions.url_generator, state.config.functions.sales_query
            ),
        },
        secrets,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

/// Resolves the SAP system secret and checks every key is present. Values
/// are never echoed.
async fn secrets_check(config: &AppConfig) -> HealthCheck {
    let store = store_from_config(&config.secrets);
    let outcome = system_details(store.as_ref(), &config.secrets.secret_id)
        .await
        .and_then(|details| {
            details.host()?;
            details.credentials()?;
            Ok(())
        });

    match outcome {
        Ok(()) => HealthCheck {
            status: "ready",
            detail: format!("secret `{}` resolved", config.secrets.secret_id),
        },
        Err(error) => HealthCheck { status: "degraded", detail: error.to_string() },
    }
}

//! HTTP host for the URL generator and sales query functions.
//!
//! Each function is reachable at `POST /functions/{name}/invocations`; the
//! response body is the function's own invocation result. `GET /health`
//! reports whether the configured secret can be resolved.

pub mod bootstrap;
pub mod functions;
pub mod health;

use std::sync::Arc;

use axum::Router;
use salesq_core::config::AppConfig;

pub fn app(config: Arc<AppConfig>) -> Router {
    functions::router(config.clone()).merge(health::router(config))
}

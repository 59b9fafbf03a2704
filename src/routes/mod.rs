//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The producer of the low-utilization report posts it here; the service
//! answers with the rendered summary page or a JSON snapshot of the page
//! state. Nothing is fetched or stored server-side.

pub mod report;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    Router::new()
        .route("/util-summary", get(report::initial_page).post(report::rendered_page))
        .route("/api/util-summary/view", post(report::view_snapshot))
        .route("/healthz", get(healthz))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

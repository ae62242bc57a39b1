//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The visualizer page and its generate action are plain server-rendered HTML
//! under `/`. The JSON render API and the PNG download endpoint live under
//! `/api` with permissive CORS so other front ends can call them. Every route
//! shares one request body limit taken from the server config.

pub mod circuits;
pub mod page;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON and binary API routes.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/render", post(circuits::render_api))
        .route("/api/construct.png", get(circuits::construct_png))
        .layer(cors)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.max_input_bytes;

    Router::new()
        .route("/", get(circuits::index))
        .route("/generate", post(circuits::generate))
        .route("/healthz", get(healthz))
        .merge(api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

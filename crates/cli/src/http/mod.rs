//! HTTP surface of the relay: `POST /deploy` and `GET /health`.

mod error;
mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use folio_relay_core::{Config, Environment};
use folio_relay_deployer::DeployOrchestrator;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<DeployOrchestrator>,
    token_present: bool,
    environment: Environment,
    body_limit: usize,
}

impl AppState {
    pub fn new(orchestrator: Arc<DeployOrchestrator>, config: &Config) -> Self {
        Self {
            orchestrator,
            token_present: config.has_token(),
            environment: config.server.environment,
            body_limit: config.server.body_limit_bytes,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .route("/deploy", post(handlers::deploy))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

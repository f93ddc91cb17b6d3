//! Axum router — maps URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health::health, models::list_models, qa::qa, save::save, search::search};
use crate::state::{AppState, SharedState};

/// Build the full router. CORS is open so local UIs on other ports can
/// call the relay directly.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health", get(health))
        .route("/search", post(search))
        .route("/save", post(save))
        .route("/qa", post(qa))
        .route("/models", get(list_models))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

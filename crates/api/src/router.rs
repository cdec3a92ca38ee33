//! HTTP router setup

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;
use crate::handlers;

/// Creates the bridge router.
pub fn build_router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/webhook/production", post(handlers::receive_production))
        .route("/webhook/qc", post(handlers::receive_quality_check))
        .route("/health", get(handlers::health))
        .with_state(context)
}

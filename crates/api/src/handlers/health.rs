//! Liveness probe

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub odoo: String,
}

/// `GET /health`
///
/// Always answers 200; ERP reachability is reported in the body. Only
/// authentication is attempted, nothing is read or written.
pub async fn health(State(context): State<Arc<AppContext>>) -> Json<HealthResponse> {
    match context.gateway.authenticate().await {
        Ok(_) => Json(HealthResponse { status: "healthy", odoo: "connected".to_string() }),
        Err(err) => {
            warn!(error_type = err.label(), error = %err, "Odoo health check failed");
            Json(HealthResponse { status: "unhealthy", odoo: err.to_string() })
        }
    }
}

//! Production completion webhook

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use mesbridge_domain::{ProductionEvent, RecordId};
use serde::Serialize;
use tracing::info;

use crate::auth::authorize;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ProductionResponse {
    pub status: &'static str,
    pub workorder_id: RecordId,
    pub lot_id: Option<RecordId>,
}

/// `POST /webhook/production`
///
/// The credential is checked before the body is looked at, so an
/// unauthenticated caller never learns whether its payload was well formed.
pub async fn receive_production(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    payload: Result<Json<ProductionEvent>, JsonRejection>,
) -> Result<Json<ProductionResponse>, ApiError> {
    authorize(&headers, context.api_key())?;
    let Json(event) = payload?;

    info!(
        work_order_id = %event.work_order_id,
        product_code = %event.product_code,
        quantity = event.quantity,
        "production event received"
    );

    let outcome = context.production.record_completion(&event).await?;

    Ok(Json(ProductionResponse {
        status: "success",
        workorder_id: outcome.workorder_id,
        lot_id: outcome.lot_id,
    }))
}

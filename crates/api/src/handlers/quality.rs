//! Quality inspection webhook

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use mesbridge_domain::{CheckResult, QcEvent, RecordId};
use serde::Serialize;
use tracing::info;

use crate::auth::authorize;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct QcResponse {
    pub status: &'static str,
    pub qc_id: RecordId,
    pub result: CheckResult,
}

/// `POST /webhook/qc`
pub async fn receive_quality_check(
    State(context): State<Arc<AppContext>>,
    headers: HeaderMap,
    payload: Result<Json<QcEvent>, JsonRejection>,
) -> Result<Json<QcResponse>, ApiError> {
    authorize(&headers, context.api_key())?;
    let Json(event) = payload?;

    info!(
        lot_number = %event.lot_number,
        checked = event.quantity_checked,
        rejected = event.quantity_rejected,
        "quality event received"
    );

    let outcome = context.quality.record_check(&event).await?;

    Ok(Json(QcResponse { status: "success", qc_id: outcome.qc_id, result: outcome.result }))
}

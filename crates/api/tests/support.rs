//! Shared helpers for router tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mesbridge_api::{build_router, AppContext};
use mesbridge_core::testing::InMemoryErp;
use mesbridge_domain::constants::{API_KEY_HEADER, MODEL_LOT, MODEL_PRODUCT, MODEL_USER};
use mesbridge_domain::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const API_KEY: &str = "test-webhook-key";

/// ERP seeded with product P100, users op1/qa1 and lot L-QC.
pub fn seeded_erp() -> Arc<InMemoryErp> {
    Arc::new(
        InMemoryErp::new()
            .with_record(MODEL_PRODUCT, json!({"id": 7, "default_code": "P100"}))
            .with_record(MODEL_USER, json!({"id": 3, "login": "op1"}))
            .with_record(MODEL_USER, json!({"id": 5, "login": "qa1"}))
            .with_record(MODEL_LOT, json!({"id": 12, "name": "L-QC", "product_id": [7, "Widget"]})),
    )
}

pub fn router(erp: Arc<InMemoryErp>) -> Router {
    let context = AppContext::with_gateway(erp, Secret::new(API_KEY), 1);
    build_router(Arc::new(context))
}

pub async fn post_json(
    app: Router,
    uri: &str,
    api_key: Option<&str>,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    let mut request =
        Request::builder().method("POST").uri(uri).header("content-type", "application/json");
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }

    let response = app
        .oneshot(request.body(Body::from(body.into())).expect("request"))
        .await
        .expect("response");
    read(response).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

//! Router tests for `GET /health`

mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use mesbridge_core::testing::InMemoryErp;
use serde_json::json;
use support::{get, router};

/// Validates the healthy probe response.
///
/// Assertions:
/// - Confirms the body reports `connected`.
/// - Confirms only authentication was exercised.
#[tokio::test]
async fn reports_connected_erp() {
    let erp = Arc::new(InMemoryErp::new());

    let (status, body) = get(router(erp.clone()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "odoo": "connected"}));
    assert_eq!(erp.auth_attempts(), 1);
    assert!(erp.calls().is_empty());
}

/// Validates the probe when authentication fails.
///
/// Assertions:
/// - Confirms HTTP 200 with `unhealthy` and the error text.
#[tokio::test]
async fn reports_unreachable_erp_with_ok_status() {
    let erp = Arc::new(InMemoryErp::new().failing_auth("connection refused"));

    let (status, body) = get(router(erp), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert!(body["odoo"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn needs_no_credential() {
    let (status, _) = get(router(Arc::new(InMemoryErp::new())), "/health").await;
    assert_eq!(status, StatusCode::OK);
}

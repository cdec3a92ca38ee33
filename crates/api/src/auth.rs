//! Webhook caller authentication

use axum::http::HeaderMap;
use mesbridge_domain::constants::API_KEY_HEADER;
use mesbridge_domain::{BridgeError, Result, Secret};
use tracing::warn;

/// Check the `x-api-key` header against the configured secret.
///
/// A missing, non-ASCII or mismatching header is `Unauthorized`. The
/// comparison is constant-time and the presented value is never logged.
pub fn authorize(headers: &HeaderMap, expected: &Secret) -> Result<()> {
    let presented = headers.get(API_KEY_HEADER).and_then(|value| value.to_str().ok());

    match presented {
        Some(candidate) if expected.matches(candidate) => Ok(()),
        Some(_) => {
            warn!("rejected webhook call with an invalid API key");
            Err(BridgeError::Unauthorized)
        }
        None => {
            warn!("rejected webhook call without an API key");
            Err(BridgeError::Unauthorized)
        }
    }
}

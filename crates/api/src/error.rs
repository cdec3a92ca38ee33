//! HTTP error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mesbridge_domain::BridgeError;
use serde::Serialize;
use tracing::{error, info};

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Domain error on its way out as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub BridgeError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            BridgeError::Unauthorized => StatusCode::UNAUTHORIZED,
            BridgeError::NotFound(_) | BridgeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BridgeError> for ApiError {
    fn from(error: BridgeError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(BridgeError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.0.to_string();

        if self.0.is_client_error() {
            info!(error_type = self.0.label(), status = status.as_u16(), "webhook request rejected");
        } else {
            error!(error_type = self.0.label(), error = %detail, "webhook processing failed");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

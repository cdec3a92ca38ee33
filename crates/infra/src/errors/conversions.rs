//! Conversions from external infrastructure errors into domain errors.

use mesbridge_domain::BridgeError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BridgeError);

impl From<InfraError> for BridgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

trait IntoBridgeError {
    fn into_bridge(self) -> BridgeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BridgeError */
/* -------------------------------------------------------------------------- */

impl IntoBridgeError for HttpError {
    fn into_bridge(self) -> BridgeError {
        if self.is_timeout() {
            return BridgeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BridgeError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => BridgeError::Auth(message),
                404 => BridgeError::Integration(format!("ERP endpoint not found ({message})")),
                400..=499 => BridgeError::Integration(message),
                _ => BridgeError::Network(message),
            };
        }

        if self.is_decode() {
            return BridgeError::Integration(format!("malformed ERP response: {self}"));
        }

        BridgeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_bridge())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BridgeError */
/* -------------------------------------------------------------------------- */

impl IntoBridgeError for JsonError {
    fn into_bridge(self) -> BridgeError {
        BridgeError::Integration(format!("malformed ERP response: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_bridge())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → BridgeError */
/* -------------------------------------------------------------------------- */

impl IntoBridgeError for UrlError {
    fn into_bridge(self) -> BridgeError {
        BridgeError::Config(format!("invalid ERP URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_bridge())
    }
}

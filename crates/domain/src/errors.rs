//! Error types used throughout the bridge

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for mesbridge
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The ERP rejected the configured integration credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The webhook caller presented a missing or wrong shared secret.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A remote fault raised by the ERP while executing a method.
    #[error("Integration error: {0}")]
    Integration(String),
}

impl BridgeError {
    /// Returns true for errors caused by the caller's request rather than by
    /// the bridge or the ERP.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotFound(_) | Self::InvalidInput(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Unauthorized => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Integration(_) => "integration",
        }
    }
}

impl From<validator::ValidationErrors> for BridgeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: failed `{}` check", err.code),
                })
            })
            .collect();
        // HashMap iteration order is unstable; keep messages deterministic.
        details.sort();

        if details.is_empty() {
            Self::InvalidInput(errors.to_string())
        } else {
            Self::InvalidInput(details.join("; "))
        }
    }
}

/// Result type alias for mesbridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that `NotFound` displays without a prefix.
    ///
    /// Assertions:
    /// - Confirms the message is returned verbatim.
    #[test]
    fn not_found_displays_bare_message() {
        let err = BridgeError::NotFound("Product P100 not found".into());
        assert_eq!(err.to_string(), "Product P100 not found");
    }

    /// Validates the client/server split of `BridgeError`.
    ///
    /// Assertions:
    /// - Confirms caller-caused variants report `is_client_error`.
    /// - Confirms ERP and transport variants do not.
    #[test]
    fn client_errors_are_distinguished() {
        assert!(BridgeError::Unauthorized.is_client_error());
        assert!(BridgeError::NotFound("x".into()).is_client_error());
        assert!(BridgeError::InvalidInput("x".into()).is_client_error());
        assert!(!BridgeError::Auth("x".into()).is_client_error());
        assert!(!BridgeError::Integration("x".into()).is_client_error());
        assert!(!BridgeError::Network("x".into()).is_client_error());
    }

    /// Validates the tagged serde representation.
    ///
    /// Assertions:
    /// - Confirms `type` carries the variant name and `message` the text.
    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(BridgeError::Integration("boom".into())).unwrap();
        assert_eq!(json["type"], "Integration");
        assert_eq!(json["message"], "boom");
    }
}

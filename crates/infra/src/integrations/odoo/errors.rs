//! Odoo-specific error types and classification
//!
//! Odoo reports every server-side exception inside a JSON-RPC `error`
//! object. The exception class name tells rejected credentials apart from
//! business-rule failures; everything is converted into the domain error
//! at the gateway boundary.

use std::fmt;

use mesbridge_domain::BridgeError;
use reqwest::StatusCode;

use super::rpc::RpcFault;

/// Odoo error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdooErrorCategory {
    /// Credentials rejected (`AccessDenied`, or `authenticate` returned false)
    AccessDenied,

    /// The user lacks rights on the model or record (`AccessError`)
    AccessRights,

    /// A business rule or constraint refused the write
    /// (`ValidationError`, `UserError`)
    Validation,

    /// The referenced record no longer exists (`MissingError`)
    MissingRecord,

    /// The endpoint answered with a non-success HTTP status
    Unavailable,

    /// Any other server exception, or a response the bridge cannot read
    ServerFault,
}

impl OdooErrorCategory {
    /// Classify a server exception by its fully qualified class name
    pub fn from_exception_name(name: &str) -> Self {
        match name.rsplit('.').next().unwrap_or_default() {
            "AccessDenied" => Self::AccessDenied,
            "AccessError" => Self::AccessRights,
            "ValidationError" | "UserError" | "ValidationFailed" => Self::Validation,
            "MissingError" => Self::MissingRecord,
            _ => Self::ServerFault,
        }
    }
}

impl fmt::Display for OdooErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied => write!(f, "Access Denied"),
            Self::AccessRights => write!(f, "Access Rights"),
            Self::Validation => write!(f, "Validation Error"),
            Self::MissingRecord => write!(f, "Missing Record"),
            Self::Unavailable => write!(f, "Unavailable"),
            Self::ServerFault => write!(f, "Server Fault"),
        }
    }
}

/// Odoo error with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdooError {
    category: OdooErrorCategory,
    message: String,
    exception: Option<String>,
}

impl OdooError {
    pub fn new(category: OdooErrorCategory, message: impl Into<String>) -> Self {
        Self { category, message: message.into(), exception: None }
    }

    /// Credentials were rejected by `common.authenticate`.
    pub fn access_denied() -> Self {
        Self::new(OdooErrorCategory::AccessDenied, "Odoo rejected the configured credentials")
    }

    /// Build from the `error` member of a JSON-RPC response.
    ///
    /// The exception's own message is preferred over the generic
    /// "Odoo Server Error" envelope text.
    pub fn from_fault(fault: RpcFault) -> Self {
        let RpcFault { message, data, .. } = fault;
        match data {
            Some(data) => {
                let category = OdooErrorCategory::from_exception_name(&data.name);
                let message = if data.message.is_empty() { message } else { data.message };
                Self {
                    category,
                    message,
                    exception: (!data.name.is_empty()).then_some(data.name),
                }
            }
            None => Self::new(OdooErrorCategory::ServerFault, message),
        }
    }

    /// Classify a non-success HTTP status from the endpoint.
    pub fn from_status_code(status: StatusCode, body: &str) -> Self {
        let category = match status.as_u16() {
            401 | 403 => OdooErrorCategory::AccessDenied,
            404 => OdooErrorCategory::ServerFault,
            _ => OdooErrorCategory::Unavailable,
        };
        let reason = status.canonical_reason().unwrap_or("Unknown");
        let message = match body.trim() {
            "" => format!("HTTP {}: {reason}", status.as_u16()),
            text => format!("HTTP {}: {reason}: {}", status.as_u16(), truncate(text, 200)),
        };
        Self::new(category, message)
    }

    pub fn category(&self) -> OdooErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server exception class, when Odoo reported one.
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// Convert to domain error type
    pub fn into_domain_error(self) -> BridgeError {
        match self.category {
            OdooErrorCategory::AccessDenied => BridgeError::Auth(self.message),
            OdooErrorCategory::Unavailable => BridgeError::Network(self.message),
            OdooErrorCategory::AccessRights
            | OdooErrorCategory::Validation
            | OdooErrorCategory::MissingRecord
            | OdooErrorCategory::ServerFault => BridgeError::Integration(self.message),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl fmt::Display for OdooError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)?;
        if let Some(exception) = &self.exception {
            write!(f, " ({exception})")?;
        }
        Ok(())
    }
}

impl std::error::Error for OdooError {}

impl From<OdooError> for BridgeError {
    fn from(err: OdooError) -> Self {
        err.into_domain_error()
    }
}

#[cfg(test)]
mod tests {
    use super::super::rpc::FaultData;
    use super::*;

    fn fault(name: &str, message: &str) -> RpcFault {
        RpcFault {
            code: 200,
            message: "Odoo Server Error".into(),
            data: Some(FaultData {
                name: name.into(),
                message: message.into(),
                debug: String::new(),
            }),
        }
    }

    #[test]
    fn classifies_exception_names() {
        use OdooErrorCategory::*;
        assert_eq!(OdooErrorCategory::from_exception_name("odoo.exceptions.AccessDenied"), AccessDenied);
        assert_eq!(OdooErrorCategory::from_exception_name("odoo.exceptions.AccessError"), AccessRights);
        assert_eq!(OdooErrorCategory::from_exception_name("odoo.exceptions.UserError"), Validation);
        assert_eq!(
            OdooErrorCategory::from_exception_name("odoo.exceptions.ValidationError"),
            Validation
        );
        assert_eq!(OdooErrorCategory::from_exception_name("odoo.exceptions.MissingError"), MissingRecord);
        assert_eq!(OdooErrorCategory::from_exception_name("builtins.KeyError"), ServerFault);
        assert_eq!(OdooErrorCategory::from_exception_name(""), ServerFault);
    }

    #[test]
    fn access_denied_fault_becomes_auth_error() {
        let err = OdooError::from_fault(fault("odoo.exceptions.AccessDenied", "Access Denied"));
        assert_eq!(err.exception(), Some("odoo.exceptions.AccessDenied"));
        assert_eq!(BridgeError::from(err), BridgeError::Auth("Access Denied".into()));
    }

    #[test]
    fn validation_fault_keeps_server_message() {
        let err = OdooError::from_fault(fault(
            "odoo.exceptions.ValidationError",
            "The lot name must be unique per product",
        ));
        assert_eq!(err.category(), OdooErrorCategory::Validation);
        assert_eq!(
            BridgeError::from(err),
            BridgeError::Integration("The lot name must be unique per product".into())
        );
    }

    #[test]
    fn fault_without_data_uses_envelope_message() {
        let err = OdooError::from_fault(RpcFault {
            code: 404,
            message: "404: Not Found".into(),
            data: None,
        });
        assert_eq!(err.category(), OdooErrorCategory::ServerFault);
        assert_eq!(err.message(), "404: Not Found");
        assert_eq!(err.exception(), None);
    }

    #[test]
    fn gateway_errors_map_to_network() {
        let err = OdooError::from_status_code(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.category(), OdooErrorCategory::Unavailable);
        assert_eq!(BridgeError::from(err), BridgeError::Network("HTTP 502: Bad Gateway".into()));
    }

    #[test]
    fn status_body_is_truncated() {
        let body = "x".repeat(500);
        let err = OdooError::from_status_code(StatusCode::SERVICE_UNAVAILABLE, &body);
        assert!(err.message().len() < 260);
    }

    #[test]
    fn display_includes_exception_class() {
        let err = OdooError::from_fault(fault("odoo.exceptions.UserError", "Nope"));
        assert_eq!(err.to_string(), "Validation Error: Nope (odoo.exceptions.UserError)");
    }
}

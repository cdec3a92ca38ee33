//! Application constants
//!
//! ERP model names and thresholds shared by the handlers and the gateway.

// Server defaults
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_ERP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_COMPANY_ID: i64 = 1;

/// Header carrying the webhook shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Values shipped as examples that must never reach a running deployment.
pub const PLACEHOLDER_VALUES: &[&str] =
    &["https://your-odoo-instance.com", "api-key", "your-secret-api-key"];

// Odoo models
pub const MODEL_PRODUCT: &str = "product.product";
pub const MODEL_USER: &str = "res.users";
pub const MODEL_WORKORDER: &str = "mrp.workorder";
pub const MODEL_LOT: &str = "stock.lot";
pub const MODEL_QUALITY_CHECK: &str = "quality.check";
pub const MODEL_QUALITY_CHECK_LINE: &str = "quality.check.line";
pub const MODEL_QUALITY_ALERT: &str = "quality.alert";

/// Rejected quantities above this raise a major alert instead of a minor one.
pub const MAJOR_REJECTION_THRESHOLD: i64 = 10;

/// Datetime layout the ERP accepts for datetime fields.
pub const ERP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//! Webhook payloads and handler outcomes

pub mod production;
pub mod quality;

pub use production::{ProductionEvent, ProductionOutcome};
pub use quality::{AlertSeverity, CheckResult, Measurement, QcEvent, QcOutcome};

/// Identifier of a record in the ERP.
pub type RecordId = i64;

/// Identifier of the ERP user the integration authenticated as.
pub type UserId = i64;

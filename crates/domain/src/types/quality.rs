//! Quality-control inspection events and the values derived from them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RecordId;
use crate::constants::MAJOR_REJECTION_THRESHOLD;
use crate::utils::{quantity, tag, timestamp};

/// Inspection results for one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QcEvent {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub lot_number: String,
    pub product_code: String,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(deserialize_with = "quantity::deserialize")]
    pub quantity_checked: i64,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(deserialize_with = "quantity::deserialize")]
    pub quantity_passed: i64,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[serde(deserialize_with = "quantity::deserialize")]
    pub quantity_rejected: i64,
    pub inspector_id: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub measurements: Option<Vec<Measurement>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QcEvent {
    /// Overall verdict of the inspection.
    pub fn result(&self) -> CheckResult {
        CheckResult::from_rejected(self.quantity_rejected)
    }

    /// Severity of the nonconformity alert to raise, if any.
    pub fn alert_severity(&self) -> Option<AlertSeverity> {
        AlertSeverity::for_rejected(self.quantity_rejected)
    }
}

/// A single measured parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub value: f64,
    pub spec_min: f64,
    pub spec_max: f64,
    #[serde(deserialize_with = "tag::deserialize")]
    pub result: CheckResult,
}

/// Pass/fail verdict, used for whole checks and for individual measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckResult {
    Pass,
    Fail,
}

crate::impl_domain_status_conversions!(CheckResult {
    Pass => "pass",
    Fail => "fail",
});

impl CheckResult {
    /// Any rejected unit fails the check.
    pub fn from_rejected(quantity_rejected: i64) -> Self {
        if quantity_rejected > 0 {
            Self::Fail
        } else {
            Self::Pass
        }
    }
}

/// Severity of a nonconformity alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Minor,
    Major,
}

crate::impl_domain_status_conversions!(AlertSeverity {
    Minor => "minor",
    Major => "major",
});

impl AlertSeverity {
    /// `None` when nothing was rejected.
    pub fn for_rejected(quantity_rejected: i64) -> Option<Self> {
        match quantity_rejected {
            n if n <= 0 => None,
            n if n > MAJOR_REJECTION_THRESHOLD => Some(Self::Major),
            _ => Some(Self::Minor),
        }
    }
}

/// Records written to the ERP for one inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcOutcome {
    pub qc_id: RecordId,
    pub result: CheckResult,
}

//! Production completion events

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RecordId;
use crate::utils::{quantity, timestamp};

/// Work-order completion reported by the shop floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductionEvent {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub work_order_id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub product_code: String,
    #[validate(range(min = 1, message = "must be greater than 0"))]
    #[serde(deserialize_with = "quantity::deserialize")]
    pub quantity: i64,
    pub operator_id: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub lot_number: Option<String>,
}

/// Records written to the ERP for one production event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOutcome {
    pub workorder_id: RecordId,
    pub lot_id: Option<RecordId>,
}

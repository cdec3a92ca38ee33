//! Quality inspection service

use std::sync::Arc;

use mesbridge_domain::constants::{
    MODEL_LOT, MODEL_QUALITY_ALERT, MODEL_QUALITY_CHECK, MODEL_QUALITY_CHECK_LINE, MODEL_USER,
};
use mesbridge_domain::utils::timestamp::to_erp_string;
use mesbridge_domain::{
    AlertSeverity, BridgeError, Measurement, QcEvent, QcOutcome, RecordId, Result,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use validator::Validate;

use crate::erp_ports::{reference, Criterion, ErpGateway, Values};

/// Records inspections as quality checks, check lines and alerts
pub struct QualityService {
    gateway: Arc<dyn ErpGateway>,
}

impl QualityService {
    pub fn new(gateway: Arc<dyn ErpGateway>) -> Self {
        Self { gateway }
    }

    /// Record one inspection against an existing lot.
    ///
    /// Check lines are created one call at a time after the check itself; a
    /// failure part way leaves the earlier lines in place. An alert is raised
    /// only when units were rejected.
    pub async fn record_check(&self, event: &QcEvent) -> Result<QcOutcome> {
        event.validate()?;

        let lot = self
            .gateway
            .find_one(MODEL_LOT, &[Criterion::eq("name", event.lot_number.as_str())], &[
                "id",
                "product_id",
            ])
            .await?
            .ok_or_else(|| BridgeError::NotFound(format!("Lot {} not found", event.lot_number)))?;
        let lot_id = lot.id()?;
        let product_id = lot.many2one_id("product_id");

        let inspector_id = self
            .gateway
            .find_id(MODEL_USER, &[Criterion::eq("login", event.inspector_id.as_str())])
            .await?;

        let result = event.result();
        let mut values = Values::new();
        values.insert("name".to_string(), json!(format!("QC-{}", event.lot_number)));
        values.insert("lot_id".to_string(), json!(lot_id));
        values.insert("product_id".to_string(), reference(product_id));
        values.insert("qty_checked".to_string(), json!(event.quantity_checked));
        values.insert("qty_passed".to_string(), json!(event.quantity_passed));
        values.insert("qty_rejected".to_string(), json!(event.quantity_rejected));
        values.insert("inspector_id".to_string(), reference(inspector_id));
        values.insert("check_date".to_string(), Value::String(to_erp_string(&event.timestamp)));
        values.insert("result".to_string(), json!(result.to_string()));
        values.insert(
            "notes".to_string(),
            event.notes.as_deref().map_or(Value::Bool(false), Value::from),
        );

        let qc_id = self.gateway.create(MODEL_QUALITY_CHECK, values).await?;
        info!(lot = %event.lot_number, qc_id, %result, "created quality check");

        for measurement in event.measurements.iter().flatten() {
            self.gateway.create(MODEL_QUALITY_CHECK_LINE, check_line(qc_id, measurement)).await?;
        }

        if let Some(severity) = event.alert_severity() {
            let alert = alert_values(event, lot_id, product_id, inspector_id, severity);
            let alert_id = self.gateway.create(MODEL_QUALITY_ALERT, alert).await?;
            warn!(
                lot = %event.lot_number,
                alert_id,
                %severity,
                rejected = event.quantity_rejected,
                "raised nonconformity alert"
            );
        }

        Ok(QcOutcome { qc_id, result })
    }
}

fn check_line(qc_id: RecordId, measurement: &Measurement) -> Values {
    let mut values = Values::new();
    values.insert("check_id".to_string(), json!(qc_id));
    values.insert("parameter".to_string(), json!(measurement.parameter));
    values.insert("value".to_string(), json!(measurement.value));
    values.insert("spec_min".to_string(), json!(measurement.spec_min));
    values.insert("spec_max".to_string(), json!(measurement.spec_max));
    values.insert("result".to_string(), json!(measurement.result.to_string()));
    values
}

fn alert_values(
    event: &QcEvent,
    lot_id: RecordId,
    product_id: Option<RecordId>,
    inspector_id: Option<RecordId>,
    severity: AlertSeverity,
) -> Values {
    let mut values = Values::new();
    values.insert("name".to_string(), json!(format!("ALERT-{}", event.lot_number)));
    values.insert("lot_id".to_string(), json!(lot_id));
    values.insert("product_id".to_string(), reference(product_id));
    values.insert("alert_type".to_string(), json!("nonconformity"));
    values.insert("severity".to_string(), json!(severity.to_string()));
    values.insert(
        "description".to_string(),
        json!(format!("{} items rejected", event.quantity_rejected)),
    );
    values.insert("user_id".to_string(), reference(inspector_id));
    values
}

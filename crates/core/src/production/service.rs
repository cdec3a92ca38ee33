//! Production completion service - forwards work-order completions to the ERP

use std::sync::Arc;

use mesbridge_domain::constants::{
    DEFAULT_COMPANY_ID, MODEL_LOT, MODEL_PRODUCT, MODEL_USER, MODEL_WORKORDER,
};
use mesbridge_domain::utils::timestamp::to_erp_string;
use mesbridge_domain::{BridgeError, ProductionEvent, ProductionOutcome, RecordId, Result};
use serde_json::{json, Value};
use tracing::{debug, info};
use validator::Validate;

use crate::erp_ports::{reference, Criterion, ErpGateway, Values};

/// Production completion service
pub struct ProductionService {
    gateway: Arc<dyn ErpGateway>,
    company_id: i64,
}

impl ProductionService {
    /// Create a new production service
    pub fn new(gateway: Arc<dyn ErpGateway>) -> Self {
        Self { gateway, company_id: DEFAULT_COMPANY_ID }
    }

    /// Company assigned to newly created lots.
    pub fn with_company_id(mut self, company_id: i64) -> Self {
        self.company_id = company_id;
        self
    }

    /// Record a completed work order and the lot it produced.
    ///
    /// The work order is written before the lot, and nothing is rolled back
    /// if the lot step fails. Replaying the same event creates a second work
    /// order.
    ///
    /// # Errors
    /// - `InvalidInput` if the event fails validation (no ERP call is made)
    /// - `NotFound` if the product code is unknown (no work order is created)
    /// - `Auth`/`Integration`/`Network` for ERP failures
    pub async fn record_completion(&self, event: &ProductionEvent) -> Result<ProductionOutcome> {
        event.validate()?;

        let product_id = self
            .gateway
            .find_id(MODEL_PRODUCT, &[Criterion::eq("default_code", event.product_code.as_str())])
            .await?
            .ok_or_else(|| {
                BridgeError::NotFound(format!("Product {} not found", event.product_code))
            })?;

        let operator_id = self
            .gateway
            .find_id(MODEL_USER, &[Criterion::eq("login", event.operator_id.as_str())])
            .await?;
        if operator_id.is_none() {
            debug!(operator = %event.operator_id, "operator not found; leaving work order unassigned");
        }

        let workorder_id = self
            .gateway
            .create(MODEL_WORKORDER, workorder_values(event, product_id, operator_id))
            .await?;
        info!(work_order = %event.work_order_id, workorder_id, "created work order");

        let lot_id = match non_empty(event.lot_number.as_deref()) {
            Some(lot_number) => {
                Some(self.upsert_lot(lot_number, product_id, event.quantity).await?)
            }
            None => None,
        };

        Ok(ProductionOutcome { workorder_id, lot_id })
    }

    /// Overwrite the quantity of an existing lot, or create it.
    async fn upsert_lot(
        &self,
        lot_number: &str,
        product_id: RecordId,
        quantity: i64,
    ) -> Result<RecordId> {
        let existing = self.gateway.find_id(MODEL_LOT, &[Criterion::eq("name", lot_number)]).await?;

        if let Some(lot_id) = existing {
            let mut values = Values::new();
            values.insert("product_qty".to_string(), json!(quantity));
            self.gateway.write(MODEL_LOT, &[lot_id], values).await?;
            info!(lot_number, lot_id, quantity, "updated lot quantity");
            return Ok(lot_id);
        }

        let mut values = Values::new();
        values.insert("name".to_string(), json!(lot_number));
        values.insert("product_id".to_string(), json!(product_id));
        values.insert("product_qty".to_string(), json!(quantity));
        values.insert("company_id".to_string(), json!(self.company_id));

        let lot_id = self.gateway.create(MODEL_LOT, values).await?;
        info!(lot_number, lot_id, quantity, "created lot");
        Ok(lot_id)
    }
}

fn workorder_values(
    event: &ProductionEvent,
    product_id: RecordId,
    operator_id: Option<RecordId>,
) -> Values {
    let mut values = Values::new();
    values.insert("name".to_string(), json!(event.work_order_id));
    values.insert("product_id".to_string(), json!(product_id));
    values.insert("qty_produced".to_string(), json!(event.quantity));
    values.insert("user_id".to_string(), reference(operator_id));
    values.insert("date".to_string(), Value::String(to_erp_string(&event.timestamp)));
    values.insert("state".to_string(), json!("done"));
    if let Some(machine_id) = non_empty(event.machine_id.as_deref()) {
        values.insert("machine_id".to_string(), json!(machine_id));
    }
    values
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::testing::InMemoryErp;

    fn event() -> ProductionEvent {
        ProductionEvent {
            work_order_id: "WO-1".to_string(),
            product_code: "P100".to_string(),
            quantity: 5,
            operator_id: "op1".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            machine_id: None,
            lot_number: Some("L1".to_string()),
        }
    }

    fn erp_with_catalog() -> Arc<InMemoryErp> {
        Arc::new(
            InMemoryErp::new()
                .with_record(MODEL_PRODUCT, json!({"id": 7, "default_code": "P100"}))
                .with_record(MODEL_USER, json!({"id": 3, "login": "op1"})),
        )
    }

    /// Validates the full production flow against an empty lot table.
    ///
    /// Assertions:
    /// - Confirms the work order carries name, product, quantity, operator, date and `done` state.
    /// - Confirms a new lot is created with the event quantity and default company.
    /// - Confirms the outcome ids match the stored records.
    #[tokio::test]
    async fn creates_work_order_and_new_lot() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone());

        let outcome = service.record_completion(&event()).await.unwrap();

        let workorders = erp.records(MODEL_WORKORDER);
        assert_eq!(workorders.len(), 1);
        assert_eq!(workorders[0]["id"], json!(outcome.workorder_id));
        assert_eq!(workorders[0]["name"], json!("WO-1"));
        assert_eq!(workorders[0]["product_id"], json!(7));
        assert_eq!(workorders[0]["qty_produced"], json!(5));
        assert_eq!(workorders[0]["user_id"], json!(3));
        assert_eq!(workorders[0]["date"], json!("2024-01-01 00:00:00"));
        assert_eq!(workorders[0]["state"], json!("done"));
        assert!(workorders[0].get("machine_id").is_none());

        let lots = erp.records(MODEL_LOT);
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0]["name"], json!("L1"));
        assert_eq!(lots[0]["product_qty"], json!(5));
        assert_eq!(lots[0]["company_id"], json!(1));
        assert_eq!(outcome.lot_id, lots[0]["id"].as_i64());
    }

    /// Validates the unknown-product path.
    ///
    /// Assertions:
    /// - Confirms the error is `NotFound("Product P100 not found")`.
    /// - Confirms no work order or lot is created.
    #[tokio::test]
    async fn unknown_product_is_not_found_and_creates_nothing() {
        let erp = Arc::new(InMemoryErp::new());
        let service = ProductionService::new(erp.clone());

        let err = service.record_completion(&event()).await.unwrap_err();

        assert_eq!(err, BridgeError::NotFound("Product P100 not found".into()));
        assert!(erp.calls_to(MODEL_WORKORDER, "create").is_empty());
        assert!(erp.calls_to(MODEL_LOT, "create").is_empty());
    }

    /// Validates that an unknown operator is tolerated.
    ///
    /// Assertions:
    /// - Confirms `user_id` is sent as `false`.
    #[tokio::test]
    async fn missing_operator_leaves_work_order_unassigned() {
        let erp =
            Arc::new(InMemoryErp::new().with_record(MODEL_PRODUCT, json!({"default_code": "P100"})));
        let service = ProductionService::new(erp.clone());

        service.record_completion(&event()).await.unwrap();

        assert_eq!(erp.records(MODEL_WORKORDER)[0]["user_id"], json!(false));
    }

    /// Validates the lot update path.
    ///
    /// Assertions:
    /// - Confirms the existing lot id is returned.
    /// - Confirms `product_qty` is replaced with the event quantity, not added to.
    /// - Confirms no second lot is created.
    #[tokio::test]
    async fn existing_lot_quantity_is_overwritten() {
        let erp = erp_with_catalog();
        let lot_id = erp.insert(MODEL_LOT, json!({"name": "L1", "product_qty": 40}));
        let service = ProductionService::new(erp.clone());

        let outcome = service.record_completion(&event()).await.unwrap();

        assert_eq!(outcome.lot_id, Some(lot_id));
        let lots = erp.records(MODEL_LOT);
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0]["product_qty"], json!(5));
        assert!(erp.calls_to(MODEL_LOT, "create").is_empty());
    }

    #[tokio::test]
    async fn no_lot_number_skips_lot_handling() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone());
        let mut event = event();
        event.lot_number = None;

        let outcome = service.record_completion(&event).await.unwrap();

        assert_eq!(outcome.lot_id, None);
        assert!(erp.calls().iter().all(|call| call.model != MODEL_LOT));
    }

    #[tokio::test]
    async fn machine_reference_is_forwarded_when_supplied() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone());
        let mut event = event();
        event.machine_id = Some("CNC-04".to_string());

        service.record_completion(&event).await.unwrap();

        assert_eq!(erp.records(MODEL_WORKORDER)[0]["machine_id"], json!("CNC-04"));
    }

    /// Validates behaviour when the same event is delivered twice.
    ///
    /// Assertions:
    /// - Confirms two distinct work orders exist.
    /// - Confirms the lot is reused.
    #[tokio::test]
    async fn replaying_an_event_creates_a_second_work_order() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone());

        let first = service.record_completion(&event()).await.unwrap();
        let second = service.record_completion(&event()).await.unwrap();

        assert_ne!(first.workorder_id, second.workorder_id);
        assert_eq!(erp.records(MODEL_WORKORDER).len(), 2);
        assert_eq!(first.lot_id, second.lot_id);
        assert_eq!(erp.records(MODEL_LOT).len(), 1);
    }

    /// Validates that payload validation precedes ERP access.
    ///
    /// Assertions:
    /// - Confirms `InvalidInput` is returned.
    /// - Confirms the gateway saw zero interactions.
    #[tokio::test]
    async fn invalid_quantity_is_rejected_before_any_erp_call() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone());
        let mut event = event();
        event.quantity = 0;

        let err = service.record_completion(&event).await.unwrap_err();

        assert!(matches!(err, BridgeError::InvalidInput(_)));
        assert_eq!(erp.interaction_count(), 0);
    }

    /// Validates partial application when the lot write fails.
    ///
    /// Assertions:
    /// - Confirms the lot error is returned.
    /// - Confirms the work order remains.
    #[tokio::test]
    async fn lot_failure_after_work_order_is_not_rolled_back() {
        let erp = Arc::new(
            InMemoryErp::new()
                .with_record(MODEL_PRODUCT, json!({"default_code": "P100"}))
                .failing_on(MODEL_LOT, "create", "lot sequence exhausted"),
        );
        let service = ProductionService::new(erp.clone());

        let err = service.record_completion(&event()).await.unwrap_err();

        assert_eq!(err, BridgeError::Integration("lot sequence exhausted".into()));
        assert_eq!(erp.records(MODEL_WORKORDER).len(), 1);
    }

    #[tokio::test]
    async fn custom_company_is_used_for_new_lots() {
        let erp = erp_with_catalog();
        let service = ProductionService::new(erp.clone()).with_company_id(4);

        service.record_completion(&event()).await.unwrap();

        assert_eq!(erp.records(MODEL_LOT)[0]["company_id"], json!(4));
    }
}

//! Application context - dependency injection container

use std::sync::Arc;

use mesbridge_core::{ErpGateway, ProductionService, QualityService};
use mesbridge_domain::{Config, Result, Secret};
use mesbridge_infra::OdooGateway;
use tracing::info;

/// Type alias for the ERP gateway port trait object
pub type DynErpGateway = dyn ErpGateway + Send + Sync + 'static;

/// Application context - holds all services and dependencies
///
/// Built once at startup and shared read-only by every request.
pub struct AppContext {
    pub gateway: Arc<DynErpGateway>,
    pub production: ProductionService,
    pub quality: QualityService,
    api_key: Secret,
}

impl AppContext {
    /// Wire the services against the configured Odoo instance
    ///
    /// # Errors
    /// Returns `BridgeError::Config` if the Odoo client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let gateway: Arc<DynErpGateway> = Arc::new(OdooGateway::new(&config.odoo)?);
        info!(
            url = %config.odoo.url,
            database = %config.odoo.database,
            username = %config.odoo.username,
            "Odoo gateway configured"
        );

        Ok(Self::with_gateway(gateway, config.webhook.api_key.clone(), config.odoo.company_id))
    }

    /// Wire the services against an arbitrary gateway.
    pub fn with_gateway(gateway: Arc<DynErpGateway>, api_key: Secret, company_id: i64) -> Self {
        Self {
            production: ProductionService::new(gateway.clone()).with_company_id(company_id),
            quality: QualityService::new(gateway.clone()),
            gateway,
            api_key,
        }
    }

    /// Shared secret webhook callers must present.
    pub fn api_key(&self) -> &Secret {
        &self.api_key
    }
}

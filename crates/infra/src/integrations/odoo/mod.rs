/// Odoo integration module
///
/// Speaks Odoo's JSON-RPC endpoint (`POST {url}/jsonrpc`) and implements
/// [`mesbridge_core::ErpGateway`].
///
/// # Architecture
///
/// - **Client**: `OdooGateway` - authenticates and invokes `execute_kw`
/// - **Envelopes**: `rpc` - request/response/fault shapes
/// - **Errors**: `OdooError` - classifies server exceptions into domain errors
///
/// # Usage
///
/// ```no_run
/// use mesbridge_core::{Criterion, ErpGateway};
/// use mesbridge_domain::{OdooConfig, Secret};
/// use mesbridge_infra::integrations::odoo::OdooGateway;
///
/// # async fn example() -> mesbridge_domain::Result<()> {
/// let gateway = OdooGateway::new(&OdooConfig {
///     url: "https://erp.example.com".to_string(),
///     database: "factory".to_string(),
///     username: "bridge@example.com".to_string(),
///     password: Secret::new("odoo-api-key"),
///     timeout_secs: 30,
///     company_id: 1,
/// })?;
///
/// let product = gateway
///     .find_id("product.product", &[Criterion::eq("default_code", "P100")])
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - Rejected credentials or an unreachable server while logging in: `BridgeError::Auth`
/// - Server exceptions (validation, missing records, ...): `BridgeError::Integration`
/// - Transport failures and 5xx after login: `BridgeError::Network`, never retried
pub mod client;
pub mod errors;
pub mod rpc;

pub use client::OdooGateway;
pub use errors::{OdooError, OdooErrorCategory};

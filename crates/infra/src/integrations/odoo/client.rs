/// Odoo JSON-RPC client implementing the ERP gateway port
use std::time::Duration;

use async_trait::async_trait;
use mesbridge_core::erp_ports::{ErpGateway, Values};
use mesbridge_domain::{BridgeError, OdooConfig, Result, Secret, UserId};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::errors::OdooError;
use super::rpc::{RpcRequest, RpcResponse};
use crate::errors::InfraError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("mesbridge/", env!("CARGO_PKG_VERSION"));

/// Stateless Odoo client
///
/// Holds only configuration; every `execute_kw` authenticates first, so no
/// session outlives a call.
pub struct OdooGateway {
    endpoint: Url,
    database: String,
    username: String,
    password: Secret,
    http_client: HttpClient,
}

impl OdooGateway {
    /// Create a client for the configured Odoo instance
    ///
    /// # Errors
    /// Returns `BridgeError::Config` if the URL cannot be parsed.
    pub fn new(config: &OdooConfig) -> Result<Self> {
        let base = format!("{}/jsonrpc", config.url.trim().trim_end_matches('/'));
        let endpoint = Url::parse(&base).map_err(|err| BridgeError::from(InfraError::from(err)))?;

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            endpoint,
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client,
        })
    }

    /// The JSON-RPC endpoint requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one JSON-RPC `call` and unwrap its result
    async fn call(&self, service: &str, method: &str, args: Vec<Value>) -> Result<Value> {
        let request = RpcRequest::call(service, method, args);
        let request_id = request.id().to_string();

        let builder =
            self.http_client.request(Method::POST, self.endpoint.clone()).json(&request);
        let response = self.http_client.send(builder).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = OdooError::from_status_code(status, &body);
            warn!(
                service,
                method,
                request_id = %request_id,
                %status,
                "Odoo endpoint returned an error status"
            );
            return Err(err.into());
        }

        let bytes = response.bytes().await.map_err(|err| BridgeError::from(InfraError::from(err)))?;
        let body: RpcResponse =
            serde_json::from_slice(&bytes).map_err(|err| BridgeError::from(InfraError::from(err)))?;

        if let Some(fault) = body.error {
            let err = OdooError::from_fault(fault);
            warn!(
                service,
                method,
                request_id = %request_id,
                category = %err.category(),
                exception = err.exception().unwrap_or("unknown"),
                "Odoo returned a fault"
            );
            return Err(err.into());
        }

        Ok(body.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ErpGateway for OdooGateway {
    /// Transport failures surface as `Auth`: an unreachable ERP means no
    /// identity could be established.
    async fn authenticate(&self) -> Result<UserId> {
        let result = self
            .call("common", "authenticate", vec![
                json!(self.database),
                json!(self.username),
                json!(self.password.expose()),
                json!({}),
            ])
            .await
            .map_err(|err| match err {
                BridgeError::Network(message) => {
                    BridgeError::Auth(format!("Odoo is unreachable: {message}"))
                }
                other => other,
            })?;

        match result {
            Value::Number(uid) => uid.as_i64().ok_or_else(|| {
                BridgeError::Integration(format!("Odoo returned a non-integer uid: {uid}"))
            }),
            Value::Bool(false) => Err(OdooError::access_denied().into()),
            other => Err(BridgeError::Integration(format!(
                "unexpected authenticate result from Odoo: {other}"
            ))),
        }
    }

    async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Values,
    ) -> Result<Value> {
        let uid = self.authenticate().await?;
        debug!(model, method, uid, "executing Odoo method");

        self.call("object", "execute_kw", vec![
            json!(self.database),
            json!(uid),
            json!(self.password.expose()),
            json!(model),
            json!(method),
            Value::Array(args),
            Value::Object(kwargs),
        ])
        .await
    }
}

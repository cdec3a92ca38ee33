//! Configuration management

use serde::Deserialize;

use crate::constants::{DEFAULT_BIND_ADDR, DEFAULT_COMPANY_ID, DEFAULT_ERP_TIMEOUT_SECS};
use crate::secret::Secret;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub odoo: OdooConfig,
    pub webhook: WebhookConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Odoo connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OdooConfig {
    pub url: String,
    pub database: String,
    pub username: String,
    pub password: Secret,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Company assigned to lots created by the bridge.
    #[serde(default = "default_company_id")]
    pub company_id: i64,
}

/// Inbound webhook authentication
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    pub api_key: Secret,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

crate::impl_domain_status_conversions!(LogFormat {
    Json => "json",
    Pretty => "pretty",
});

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr(), log_format: LogFormat::default() }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_ERP_TIMEOUT_SECS
}

fn default_company_id() -> i64 {
    DEFAULT_COMPANY_ID
}

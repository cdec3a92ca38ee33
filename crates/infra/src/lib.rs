//! # mesbridge Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client implementation
//! - The Odoo JSON-RPC gateway
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `mesbridge-core`
//! - Depends on `mesbridge-domain` and `mesbridge-core`
//! - Contains all "impure" code (network and file I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::odoo::OdooGateway;

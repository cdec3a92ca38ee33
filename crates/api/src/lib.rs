//! # mesbridge API
//!
//! HTTP application layer - webhook endpoints and main entry point.
//!
//! This crate contains:
//! - axum handlers for the production, quality and health endpoints
//! - Application context (dependency injection)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the Odoo gateway into the core services

pub mod auth;
pub mod context;
pub mod error;
pub mod handlers;
pub mod router;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use error::ApiError;
pub use router::build_router;

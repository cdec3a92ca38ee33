//! # mesbridge Domain
//!
//! Business domain types and models for mesbridge.
//!
//! This crate contains:
//! - Webhook payload types (production and quality-control events)
//! - Domain error types and Result definitions
//! - Configuration structures and the `Secret` wrapper
//! - Domain constants (ERP model names, thresholds)
//!
//! ## Architecture
//! - No dependencies on other mesbridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod secret;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use secret::Secret;
pub use types::*;

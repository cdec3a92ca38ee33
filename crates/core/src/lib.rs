//! # mesbridge Core
//!
//! Business logic for forwarding shop-floor events to the ERP.
//!
//! This crate contains:
//! - The ERP gateway port ([`ErpGateway`])
//! - The production and quality services built on it
//!
//! ## Architecture Principles
//! - Only depends on `mesbridge-domain`
//! - No HTTP or ERP wire code
//! - All external dependencies via traits

pub mod erp_ports;
pub mod production;
pub mod quality;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use erp_ports::{reference, Criterion, ErpGateway, Record, Values};
pub use production::ProductionService;
pub use quality::QualityService;

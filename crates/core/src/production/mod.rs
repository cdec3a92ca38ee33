//! Production completion domain

pub mod service;

pub use service::ProductionService;

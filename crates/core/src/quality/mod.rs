//! Quality inspection domain

pub mod service;

pub use service::QualityService;

//! HTTP handlers

pub mod health;
pub mod production;
pub mod quality;

pub use health::health;
pub use production::receive_production;
pub use quality::receive_quality_check;

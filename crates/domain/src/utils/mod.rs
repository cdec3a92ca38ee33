//! Domain utilities

pub mod quantity;
pub mod tag;
pub mod timestamp;

//! Utilities

pub mod logging;

pub use logging::{init_logging, with_bootstrap_logging};

//! Macro for implementing Display and FromStr for tag enums
//!
//! ERP selection fields (`result`, `severity`, ...) travel as lowercase
//! strings. This macro gives an enum a single source of truth for that
//! string form, used both when rendering values for the ERP and when parsing
//! them from configuration.
//!
//! # Example
//!
//! ```rust
//! use mesbridge_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum WorkorderState {
//!     Ready,
//!     Progress,
//!     Done,
//! }
//!
//! impl_domain_status_conversions!(WorkorderState {
//!     Ready => "ready",
//!     Progress => "progress",
//!     Done => "done",
//! });
//!
//! assert_eq!(WorkorderState::Done.to_string(), "done");
//! assert_eq!("PROGRESS".parse::<WorkorderState>(), Ok(WorkorderState::Progress));
//! ```

/// Implements Display and FromStr traits for tag enums
///
/// - Display writes the mapped string
/// - FromStr parses case-insensitively and names the enum in its error
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

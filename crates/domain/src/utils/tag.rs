//! Lenient parsing of selection tags
//!
//! Shop-floor senders are inconsistent about case (`"PASS"`, `"Pass"`), so
//! inbound tags go through the enum's `FromStr`, which trims and lowercases.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// `serde(deserialize_with)` adapter for enums built with
/// [`impl_domain_status_conversions!`](crate::impl_domain_status_conversions).
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

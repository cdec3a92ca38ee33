//! Event timestamp parsing and ERP formatting
//!
//! Webhook senders emit either RFC 3339 timestamps with an offset or naive
//! ISO-8601 datetimes. Both are normalised to a naive UTC datetime, which is
//! what the ERP stores.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

use crate::constants::ERP_DATETIME_FORMAT;

/// Parse an inbound timestamp into naive UTC.
///
/// Accepts `2024-01-01T00:00:00Z`, `2024-01-01T02:00:00+02:00`,
/// `2024-01-01T00:00:00`, `2024-01-01T00:00:00.250` and the space-separated
/// variants of the naive forms.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();

    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Ok(aware.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .ok_or_else(|| format!("invalid timestamp `{raw}`: expected an ISO-8601 datetime"))
}

/// Render a datetime the way the ERP expects datetime fields.
pub fn to_erp_string(value: &NaiveDateTime) -> String {
    value.format(ERP_DATETIME_FORMAT).to_string()
}

/// `serde(deserialize_with)` adapter around [`parse_timestamp`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// `serde(serialize_with)` adapter emitting ISO-8601 without offset.
pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S").to_string())
}

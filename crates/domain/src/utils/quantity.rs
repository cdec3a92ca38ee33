//! Integer quantities that tolerate a float encoding
//!
//! Some MES exports serialise every number as a float (`5.0`). Integral
//! floats are accepted; fractional or out-of-range values are refused.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(i64),
    Float(f64),
}

/// `serde(deserialize_with)` adapter for whole-unit counts.
pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Number::deserialize(deserializer)? {
        Number::Int(value) => Ok(value),
        Number::Float(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        Number::Float(value) => {
            Err(serde::de::Error::custom(format!("expected a whole number, got {value}")))
        }
    }
}

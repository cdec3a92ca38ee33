//! Secret string type with automatic memory zeroization
//!
//! Holds the webhook shared secret and the ERP password. The inner value is
//! zeroed on drop, never printed by `Debug`/`Display`, and compared in
//! constant time.

use std::fmt;

use serde::{Deserialize, Deserializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret string that zeroes memory on drop
///
/// There is intentionally no `PartialEq`; use [`Secret::matches`] so
/// comparisons never short-circuit on the first differing byte.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    inner: String,
}

impl Secret {
    /// Create a new secret
    pub fn new(value: impl Into<String>) -> Self {
        Self { inner: value.into() }
    }

    /// Expose the inner value (use with caution)
    ///
    /// The exposed value must not be stored or logged.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Compare a caller-supplied candidate with this secret in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.inner.as_bytes(), candidate.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Constant-time comparison to prevent timing attacks
///
/// Runs over the longer of the two inputs so the loop count does not depend
/// on where (or whether) the inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = (a.len() ^ b.len()) as u64;

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= u64::from(x ^ y);
    }

    diff == 0
}

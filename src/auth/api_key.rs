//! Defines the shared API key and the access gate configuration.

use std::fmt::Debug;

use crate::Error;

/// A pre-shared static token that clients send in the
/// [API key header](super::API_KEY_HEADER).
///
/// The key is never empty. Its [Debug] output is redacted so that the key does
/// not end up in the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create an API key from a configured secret.
    ///
    /// # Errors
    /// Returns [Error::ApiKeyNotConfigured] if `key` is empty.
    pub fn new(key: &str) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::ApiKeyNotConfigured);
        }

        Ok(Self(key.to_owned()))
    }

    /// Whether the raw header value `candidate` is exactly this key.
    pub fn matches(&self, candidate: &[u8]) -> bool {
        self.0.as_bytes() == candidate
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(********)")
    }
}

/// Whether the non-status routes require the API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGate {
    /// All routes are open.
    Disabled,
    /// Every route except the status route requires the key.
    Enabled(ApiKey),
}

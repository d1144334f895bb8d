//! The validated startup configuration for the server.

use std::net::{IpAddr, SocketAddr};

use crate::{
    Error,
    auth::{AccessGate, ApiKey},
};

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The address to serve the API from.
    pub addr: SocketAddr,
    /// File path to the SQLite database, or `:memory:` for an in-memory database.
    pub db_path: String,
    /// Whether the non-status routes require the API key.
    pub access_gate: AccessGate,
}

impl Config {
    /// Create a [Config] from the raw startup settings.
    ///
    /// An `api_key` given while `require_api_key` is false is ignored.
    ///
    /// # Errors
    /// Returns [Error::ApiKeyNotConfigured] if `require_api_key` is set but
    /// `api_key` is missing or empty.
    pub fn new(
        host: IpAddr,
        port: u16,
        db_path: &str,
        require_api_key: bool,
        api_key: Option<&str>,
    ) -> Result<Self, Error> {
        let access_gate = match (require_api_key, api_key) {
            (true, Some(key)) => AccessGate::Enabled(ApiKey::new(key)?),
            (true, None) => return Err(Error::ApiKeyNotConfigured),
            (false, Some(_)) => {
                tracing::warn!("An API key was configured but the access gate is disabled.");
                AccessGate::Disabled
            }
            (false, None) => AccessGate::Disabled,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            db_path: db_path.to_owned(),
            access_gate,
        })
    }
}

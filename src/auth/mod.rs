//! The optional access gate that guards the API behind a shared API key.

mod api_key;
mod middleware;

pub use api_key::{AccessGate, ApiKey};
pub use middleware::{API_KEY_HEADER, access_guard};

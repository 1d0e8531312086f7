//! HTTP adapters for the MemoryOS REST API. Implement SessionPort and MemoryPort.
//!
//! All clients built from one `reqwest::Client` share its cookie jar, which is
//! what carries the session credential between calls.

mod response;
pub mod memory_client;
pub mod session_client;

pub use memory_client::HttpMemoryClient;
pub use session_client::HttpSessionClient;

use crate::domain::DomainError;
use std::time::Duration;

/// Client with a cookie store (`credentials: include` semantics) and a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))
}

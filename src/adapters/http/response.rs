//! Response classification shared by the HTTP adapters.
//!
//! - transport failure before a status arrives -> `Connectivity`
//! - non-success status -> `Remote` with the server's `message`, or the caller's fallback
//! - success with an empty or undecodable body -> `ResponseFormat`

use crate::domain::DomainError;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Error payload the backend sends with failures (`{"message": "..."}`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub(crate) fn connectivity(err: reqwest::Error) -> DomainError {
    DomainError::Connectivity(err.to_string())
}

fn remote(status: StatusCode, body: &str, fallback: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = %status, message = %message, "API returned error");
    DomainError::Remote {
        status: status.as_u16(),
        message,
    }
}

async fn read_body(response: Response) -> Result<(StatusCode, String), DomainError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DomainError::Connectivity(format!("reading response body: {}", e)))?;
    Ok((status, body))
}

/// Decode a success body as `T`.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, DomainError> {
    let (status, body) = read_body(response).await?;
    if !status.is_success() {
        return Err(remote(status, &body, fallback));
    }
    if body.trim().is_empty() {
        return Err(DomainError::ResponseFormat(format!(
            "empty body with status {}",
            status
        )));
    }
    serde_json::from_str(&body).map_err(|e| {
        warn!(error = %e, body = %body.chars().take(200).collect::<String>(), "JSON parse failed");
        DomainError::ResponseFormat(e.to_string())
    })
}

/// Only the status matters; the body is ignored on success.
pub(crate) async fn expect_success(response: Response, fallback: &str) -> Result<(), DomainError> {
    let (status, body) = read_body(response).await?;
    if status.is_success() {
        Ok(())
    } else {
        Err(remote(status, &body, fallback))
    }
}

//! Domain errors. Used by ports, use cases and the store's error banner.
//!
//! Adapters map transport failures into these. Views switch on the variant,
//! never on message text.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Client-side form check failed. Never reaches the network or the store.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The request could not reach the server.
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Success status, but the body was empty, not JSON, or missing expected fields.
    #[error("Malformed response: {0}")]
    ResponseFormat(String),

    /// The server answered with a non-success status.
    #[error("Server error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

const CONNECTIVITY_MESSAGE: &str =
    "Connection error. Please check if the server is running and try again.";
const RESPONSE_FORMAT_MESSAGE: &str = "The server sent an unexpected response. Please try again.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, DomainError::Connectivity(_))
    }

    /// Status code for `Remote` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Banner text for any view.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation { message, .. } => message.clone(),
            DomainError::Connectivity(_) => CONNECTIVITY_MESSAGE.to_string(),
            DomainError::ResponseFormat(_) => RESPONSE_FORMAT_MESSAGE.to_string(),
            DomainError::Remote { message, .. } => message.clone(),
            DomainError::Config(msg) | DomainError::Ui(msg) => msg.clone(),
        }
    }

    /// Banner text for the login and register forms.
    pub fn auth_message(&self) -> String {
        match self {
            DomainError::Remote { status: 401, message }
                if message.trim().eq_ignore_ascii_case(INVALID_CREDENTIALS) =>
            {
                format!(
                    "{}. Please check your email and password.",
                    message.trim().trim_end_matches('.')
                )
            }
            DomainError::Remote { status: 404, .. } => {
                "Account not found. Please register first or check your email.".to_string()
            }
            other => other.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_keeps_server_text() {
        let err = DomainError::Remote {
            status: 401,
            message: "Invalid credentials".into(),
        };
        let msg = err.auth_message();
        assert!(msg.contains("Invalid credentials"), "{msg}");
    }

    #[test]
    fn test_other_unauthorized_messages_pass_through() {
        let err = DomainError::Remote {
            status: 401,
            message: "Account is deactivated".into(),
        };
        assert_eq!(err.auth_message(), "Account is deactivated");

        let err = DomainError::Remote {
            status: 401,
            message: "Invalid credentials".into(),
        };
        assert_eq!(
            err.auth_message(),
            "Invalid credentials. Please check your email and password."
        );
    }

    #[test]
    fn test_connectivity_message_is_distinct() {
        let net = DomainError::Connectivity("connection refused".into()).auth_message();
        let creds = DomainError::Remote {
            status: 401,
            message: "Invalid credentials".into(),
        }
        .auth_message();
        assert_ne!(net, creds);
        assert!(net.contains("Connection error"));
    }

    #[test]
    fn test_not_found_only_special_in_auth_context() {
        let err = DomainError::Remote {
            status: 404,
            message: "Memory not found".into(),
        };
        assert_eq!(err.user_message(), "Memory not found");
        assert!(err.auth_message().contains("Account not found"));
    }
}

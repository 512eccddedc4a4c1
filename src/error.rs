//! Error taxonomy for API calls and form submission.
//!
//! `NotFound` gets a dedicated variant because the detail page must tell a
//! confirmed absence apart from a failed request. Client-side validation
//! failures never reach the network; `Validation` is also used when the
//! server rejects a contact payload (400/422).

use thiserror::Error;

/// Errors produced by [`crate::network::client::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The payload was rejected, either locally or by the server.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server confirmed the requested resource does not exist (404).
    #[error("resource not found")]
    NotFound,

    /// Transport failure, unexpected status, or unreadable body.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Message suitable for an on-screen error panel
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::NotFound => String::from("The requested resource does not exist."),
            ApiError::Network(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = ApiError::Network("Connection failed".into());
        assert_eq!(err.to_string(), "network error: Connection failed");
        assert_eq!(ApiError::NotFound.to_string(), "resource not found");
    }

    #[test]
    fn test_only_not_found_is_not_found() {
        assert!(ApiError::NotFound.is_not_found());
        assert!(!ApiError::Network("HTTP 404".into()).is_not_found());
        assert!(!ApiError::Validation("bad".into()).is_not_found());
    }
}

//! Custom error types for the application.
//!
//! - [`ChatError`] - Failures of the reply request to the chat backend
//! - [`StorageError`] - localStorage operations for the client identity
//!
//! Display strings are shown to the user verbatim as notice messages.

use thiserror::Error;

/// Errors raised while requesting a reply from the chat backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Browser reports no network connection
    #[error("You appear to be offline. Check your connection and try again.")]
    Offline,
    /// Failed to build the HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, DNS, connection reset, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("The assistant is unavailable right now (HTTP {0}).")]
    HttpError(u16),
    /// Response body was not the expected JSON envelope
    #[error("Unexpected response from the assistant: {0}")]
    JsonParseError(String),
    /// Envelope parsed but carried no reply text
    #[error("The assistant returned an empty reply.")]
    EmptyReply,
}

/// localStorage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("localStorage not available")]
    Unavailable,
    #[error("failed to save to localStorage")]
    WriteFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_messages() {
        assert_eq!(
            ChatError::HttpError(502).to_string(),
            "The assistant is unavailable right now (HTTP 502)."
        );
        assert_eq!(
            ChatError::NetworkError("reset".into()).to_string(),
            "Network error: reset"
        );
        assert!(ChatError::Offline.to_string().contains("offline"));
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(
            StorageError::Unavailable.to_string(),
            "localStorage not available"
        );
    }
}

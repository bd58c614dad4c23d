//! SDK Error Types

use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SdkError {
    /// True when the service could not give an answer at all.
    ///
    /// Timeouts, connection failures and 5xx replies count; a 4xx is an
    /// authoritative rejection of the request.
    pub fn is_unavailable(&self) -> bool {
        match self {
            SdkError::Timeout | SdkError::Transport(_) => true,
            SdkError::Http { status, .. } => *status >= 500,
            SdkError::Decode(_) | SdkError::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SdkError::Timeout
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if e.is_builder() {
            SdkError::InvalidUrl(e.to_string())
        } else {
            SdkError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(SdkError::Timeout.is_unavailable());
        assert!(SdkError::Transport("refused".into()).is_unavailable());
        assert!(SdkError::Http { status: 503, message: String::new() }.is_unavailable());

        assert!(!SdkError::Http { status: 400, message: "bad".into() }.is_unavailable());
        assert!(!SdkError::Decode("eof".into()).is_unavailable());
        assert!(!SdkError::InvalidUrl("x".into()).is_unavailable());
    }
}

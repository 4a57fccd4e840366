//! Domain error types
//!
//! The error hierarchy follows the propagation policy of the pipeline:
//! everything inside the detection/resolution/replacement boundary is either
//! absorbed locally (a degraded layer) or converted to emergency redaction.
//! None of these variants ever carries original input text.

use thiserror::Error;

/// Main Aegis error type
#[derive(Debug, Error)]
pub enum AegisError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed request input, rejected before any detection is attempted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// NER capability errors
    #[error("NER provider error: {0}")]
    Ner(#[from] NerError),

    /// One recognizer failed; absorbed by the chain, never surfaced to
    /// callers of the pipeline entry points
    #[error("Recognizer '{name}' failed: {message}")]
    Recognizer { name: &'static str, message: String },

    /// Span resolution failed; triggers emergency redaction for the request
    #[error("Span resolution failed: {0}")]
    Resolution(String),

    /// Text rewriting failed; triggers emergency redaction for the request
    #[error("Replacement failed: {0}")]
    Replacement(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// NER capability errors
///
/// These wrap the remote analyzer's failure modes without exposing the HTTP
/// client's types.
#[derive(Debug, Error)]
pub enum NerError {
    /// The capability failed to initialize; the process runs degraded
    #[error("NER capability unavailable: {0}")]
    Unavailable(String),

    /// A single analyze call failed; that call's contribution is dropped
    #[error("NER request failed: {0}")]
    RequestFailed(String),

    /// The analyzer returned a payload we could not interpret
    #[error("Invalid NER response: {0}")]
    InvalidResponse(String),

    /// The analyzer did not answer in time
    #[error("NER request timeout: {0}")]
    Timeout(String),
}

impl From<std::io::Error> for AegisError {
    fn from(err: std::io::Error) -> Self {
        AegisError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AegisError::Resolution("overlapping candidate out of bounds".to_string());
        assert_eq!(
            err.to_string(),
            "Span resolution failed: overlapping candidate out of bounds"
        );
    }

    #[test]
    fn test_ner_error_conversion() {
        let err: AegisError = NerError::Timeout("5s elapsed".to_string()).into();
        assert!(matches!(err, AegisError::Ner(NerError::Timeout(_))));
    }
}

// src/error.rs
// Standardized error types for the tutor library

use crate::llm::ProviderError;
use crate::tutor::parser::ParseError;
use thiserror::Error;

/// Main error type for the tutor library
///
/// Provider and parse failures are normally absorbed by the fallback chain;
/// they only appear here when a caller drives a component directly.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("quiz parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("operation cancelled")]
    Cancelled,
}

/// Convenience type alias for Result using TutorError
pub type Result<T> = std::result::Result<T, TutorError>;

impl TutorError {
    /// Message shown to learners when an operation fails outright
    pub fn to_user_string(&self) -> String {
        match self {
            Self::InvalidInput(msg) => msg.clone(),
            Self::Cancelled => "The request was cancelled.".to_string(),
            _ => "Sorry, I encountered an error. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Provider, ProviderFailure};

    // ============================================================================
    // TutorError construction tests
    // ============================================================================

    #[test]
    fn test_invalid_input_error() {
        let err = TutorError::InvalidInput("question_count must be 1..=20".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("question_count"));
    }

    #[test]
    fn test_cancelled_error() {
        let err = TutorError::Cancelled;
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn test_provider_error_is_transparent() {
        let err: TutorError = ProviderError::new(
            Provider::Cohere,
            ProviderFailure::Status {
                status: 429,
                body: "slow down".to_string(),
            },
        )
        .into();
        assert!(matches!(err, TutorError::Provider(_)));
        assert!(err.to_string().contains("cohere"));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: TutorError = ParseError::NoArray.into();
        assert!(matches!(err, TutorError::Parse(_)));
        assert!(err.to_string().contains("quiz parse error"));
    }

    // ============================================================================
    // to_user_string tests
    // ============================================================================

    #[test]
    fn test_user_string_hides_internal_details() {
        let err: TutorError = ProviderError::new(
            Provider::Gemini,
            ProviderFailure::Transport("connection refused".to_string()),
        )
        .into();
        assert_eq!(
            err.to_user_string(),
            "Sorry, I encountered an error. Please try again."
        );
    }

    #[test]
    fn test_user_string_for_cancelled() {
        assert_eq!(TutorError::Cancelled.to_user_string(), "The request was cancelled.");
    }

    #[test]
    fn test_user_string_keeps_invalid_input() {
        let err = TutorError::InvalidInput("subject is required".to_string());
        assert_eq!(err.to_user_string(), "subject is required");
    }
}

//! Error types for Refinr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Refinr
#[derive(Debug, Error)]
pub enum RefinrError {
    /// Generation step's collaborator call failed or returned unusable output
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Evaluation step's collaborator call failed
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Invalid state or step precondition violation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Missing or invalid loop configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Refinr operations
pub type Result<T> = std::result::Result<T, RefinrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failed_error() {
        let err = RefinrError::GenerationFailed("rate limited".to_string());
        assert_eq!(err.to_string(), "Generation failed: rate limited");
    }

    #[test]
    fn test_evaluation_failed_error() {
        let err = RefinrError::EvaluationFailed("timed out".to_string());
        assert_eq!(err.to_string(), "Evaluation failed: timed out");
    }

    #[test]
    fn test_invalid_state_error() {
        let err = RefinrError::InvalidState("question must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid state: question must not be empty");
    }

    #[test]
    fn test_config_error() {
        let err = RefinrError::Config("max-iterations must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: max-iterations must be > 0");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: RefinrError = json_err.into();
        assert!(matches!(err, RefinrError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(RefinrError::InvalidState("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}

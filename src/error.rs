//! Error types for Jobcore

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Not found error
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Background task error
    #[error("Task error: {0}")]
    Task(String),
}

/// Result type alias for Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<tokio::task::JoinError> for CoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        CoreError::Task(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_panicked_task_becomes_task_error() {
        let joined = tokio::task::spawn_blocking(|| -> Result<()> { panic!("boom") }).await;
        let err = joined.map_err(CoreError::from).and_then(|r| r).unwrap_err();
        assert!(matches!(err, CoreError::Task(_)));
        assert!(err.to_string().starts_with("Task error:"));
    }

    #[test]
    fn test_not_found_message() {
        let err = CoreError::NotFound("Question", "what-is-jsx".to_string());
        assert_eq!(err.to_string(), "Question not found: what-is-jsx");
    }
}

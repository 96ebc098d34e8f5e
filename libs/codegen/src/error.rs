//! Error types for the generation engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// The top-level specification is unusable (not an object, missing
    /// `entities`, bad namespace, ...). Reported to callers as client input errors.
    #[error("Invalid model specification: {0}")]
    InvalidSpec(String),

    #[error("Model specification too large: {what} count {actual} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    /// Whether the error was caused by the caller's input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CodegenError::InvalidSpec(_) | CodegenError::LimitExceeded { .. } | CodegenError::Json(_)
        )
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;

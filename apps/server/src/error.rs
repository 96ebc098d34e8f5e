//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use healthgen_codegen::CodegenError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Specification not found: {0}")]
    SpecNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("Generation did not finish within {0} seconds")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::SpecNotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Codegen(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Codegen(_)
            | Error::Database(_)
            | Error::Migration(_)
            | Error::Internal(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "status": status.as_u16(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_codegen_errors_map_to_bad_request() {
        let err = Error::from(CodegenError::InvalidSpec("missing entities".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = Error::from(CodegenError::Io(std::io::Error::other("disk full")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeout_is_service_unavailable() {
        assert_eq!(Error::Timeout(30).status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

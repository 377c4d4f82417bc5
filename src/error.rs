use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP handlers.
///
/// The repository functions never produce these directly; handlers translate
/// absent rows and constraint violations into the matching variant.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Author with id {0} is not found")]
    AuthorNotFound(i64),

    #[error("Such name for Author already exists")]
    AuthorNameTaken,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthorNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AuthorNameTaken => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match &self {
            // keep storage details in the logs, not in the response
            ApiError::Database(e) => {
                error!(error = %e, "database operation failed");
                status
                    .canonical_reason()
                    .unwrap_or("Internal Server Error")
                    .to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// True when the error is the storage rejecting a row over a UNIQUE constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

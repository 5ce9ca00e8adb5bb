//! Request error taxonomy and its HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Three classes of failure
//! reach the client:
//! - malformed or out-of-range input, rejected before any query runs (400)
//! - inserts referencing a missing parent row, caught by the store's
//!   foreign-key constraints (400)
//! - anything else the database reports, surfaced as a generic 500 while
//!   the underlying error goes to the log only

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

// ---

/// JSON error body returned by all endpoints: `{"error": "..."}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected at the boundary, before query execution.
    #[error("{0}")]
    Validation(String),

    /// Database-level failure. Foreign-key violations are the caller's
    /// fault (bad parent id); everything else is an internal error.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => (
                StatusCode::BAD_REQUEST,
                "referenced parent record does not exist".to_string(),
            ),
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

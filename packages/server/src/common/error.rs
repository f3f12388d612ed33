use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for resource operations.
///
/// Validation errors are detected before any store mutation and
/// short-circuit; store errors surface as `Internal` after the
/// operation's transaction has been rolled back.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    /// Wrap an internal error with an operation description, e.g.
    /// "Error creating machine". Validation errors pass through untouched.
    pub fn context(self, operation: String) -> Self {
        match self {
            ApiError::Internal(err) => ApiError::Internal(err.context(operation)),
            other => other,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                // "{:#}" renders the context chain: "Error creating machine: <cause>"
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

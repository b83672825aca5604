//! Domain error → HTTP response mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
            DomainError::Database(_) if self.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match self {
            DomainError::Unauthorized(msg) | DomainError::Conflict(msg) => msg,
            DomainError::Database(e) => {
                // Driver messages stay in the logs
                error!(error = %e, "Database failure while handling request");
                "Internal server error".to_string()
            }
        };
        (status, Json(ErrorResponse::new(detail))).into_response()
    }
}

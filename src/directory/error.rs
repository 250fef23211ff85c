use crate::ValidationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Caller-facing failures of directory operations. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No record matched the id or batch id.
    #[error("{0}")]
    NotFound(String),

    /// The batch already holds the maximum number of records.
    #[error("Batch cannot exceed {limit} hospitals")]
    CapacityExceeded { limit: usize },

    /// Batch activation refused because a member is already active.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request body or path could not be decoded.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl DirectoryError {
    pub fn hospital_not_found() -> Self {
        Self::NotFound("Hospital not found".to_string())
    }

    pub fn batch_not_found() -> Self {
        Self::NotFound("No hospitals found with the specified batch ID".to_string())
    }

    pub fn batch_already_active() -> Self {
        Self::Conflict(
            "Cannot activate batch: one or more hospitals in the batch are already active"
                .to_string(),
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::CapacityExceeded { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<JsonRejection> for DirectoryError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for DirectoryError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

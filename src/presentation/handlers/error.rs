use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::DispatchError;
use crate::domain::JobId;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Client-facing failure; each variant maps to one status code and message.
#[derive(Debug)]
pub enum ApiError {
    InvalidUrl,
    InvalidBody,
    MissingId,
    NotFound,
    NotReady,
    QueueFull,
    Unavailable(String),
    StorageUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidUrl => (StatusCode::BAD_REQUEST, "invalid url"),
            ApiError::InvalidBody => (StatusCode::BAD_REQUEST, "invalid request body"),
            ApiError::MissingId => (StatusCode::BAD_REQUEST, "missing id"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            ApiError::NotReady => (StatusCode::CONFLICT, "not ready"),
            ApiError::QueueFull => (StatusCode::TOO_MANY_REQUESTS, "queue full"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service unavailable"),
            ApiError::StorageUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::InvalidUrl(_) => ApiError::InvalidUrl,
            DispatchError::QueueFull => ApiError::QueueFull,
            DispatchError::QueueClosed => ApiError::Unavailable(error.to_string()),
            DispatchError::NotFound(_) => ApiError::NotFound,
            DispatchError::NotReady(_) => ApiError::NotReady,
            DispatchError::ArtifactStore(_) => ApiError::StorageUnavailable(error.to_string()),
            DispatchError::Repository(_) => ApiError::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::Internal(detail)
            | ApiError::StorageUnavailable(detail)
            | ApiError::Unavailable(detail) => {
                tracing::error!(status = status.as_u16(), detail = %detail, "Request failed");
            }
            _ => tracing::debug!(status = status.as_u16(), error = message, "Request rejected"),
        }
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Absent ids are a client error; ids that cannot be ours are simply unknown.
pub fn parse_job_id(raw: Option<&str>) -> Result<JobId, ApiError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let raw = raw.ok_or(ApiError::MissingId)?;
    Uuid::parse_str(raw)
        .map(JobId::from_uuid)
        .map_err(|_| ApiError::NotFound)
}

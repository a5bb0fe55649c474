use std::collections::BTreeMap;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::error::ApiError;

const ROUTES: [(&str, &str); 6] = [
    ("/v1", "Help"),
    ("/v1/add", "Add a new URL to the queue to process the screenshot"),
    ("/v1/check", "Check if the URL being processed is complete"),
    (
        "/v1/info",
        "Get screenshot URL to view / download image and other useful info",
    ),
    ("/v1/image", "Download the captured image"),
    ("/health", "Service health and queue depth"),
];

pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/v1")])
}

pub async fn help_handler() -> Result<Response, ApiError> {
    let routes: BTreeMap<&str, &str> = ROUTES.into_iter().collect();
    let body = serde_json::to_string_pretty(&routes)
        .map_err(|e| ApiError::Internal(format!("help serialization failed: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

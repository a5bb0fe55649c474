use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddResponse {
    pub id: String,
}

#[tracing::instrument(skip(state, body))]
pub async fn add_handler(
    State(state): State<AppState>,
    body: Result<Json<AddRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddResponse>), ApiError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!(error = %e, "Rejected add request body");
        ApiError::InvalidBody
    })?;
    submit(&state, &request.url).await
}

/// `GET /v1/add?url=...` for clients that only issue GET requests.
#[tracing::instrument(skip(state, query))]
pub async fn add_query_handler(
    State(state): State<AppState>,
    Query(query): Query<AddQuery>,
) -> Result<(StatusCode, Json<AddResponse>), ApiError> {
    let url = query.url.ok_or(ApiError::InvalidUrl)?;
    submit(&state, &url).await
}

async fn submit(
    state: &AppState,
    url: &str,
) -> Result<(StatusCode, Json<AddResponse>), ApiError> {
    let job_id = state.dispatcher.submit(url).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(AddResponse {
            id: job_id.to_string(),
        }),
    ))
}

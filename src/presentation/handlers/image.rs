use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

use super::check::JobQuery;
use super::error::{ApiError, parse_job_id};

#[tracing::instrument(skip(state))]
pub async fn image_handler(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Response, ApiError> {
    let job_id = parse_job_id(query.id.as_deref())?;
    let (data, format) = state.dispatcher.artifact(job_id).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, format.mime_type())],
        data,
    )
        .into_response())
}

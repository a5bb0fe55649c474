use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error::{ApiError, parse_job_id};

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub id: String,
    pub state: String,
}

#[tracing::instrument(skip(state))]
pub async fn check_handler(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<CheckResponse>, ApiError> {
    let job_id = parse_job_id(query.id.as_deref())?;
    let job = state.dispatcher.check(job_id).await?;

    Ok(Json(CheckResponse {
        id: job.id.to_string(),
        state: job.status.as_str().to_string(),
    }))
}

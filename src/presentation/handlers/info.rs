use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{CaptureResult, Job, JobError, JobStatus};
use crate::presentation::state::AppState;

use super::check::JobQuery;
use super::error::{ApiError, parse_job_id};

#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub id: String,
    pub state: String,
    pub url: String,
    pub attempt: u32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultBody {
    pub artifact: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub duration_ms: u64,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl ResultBody {
    fn from_result(job: &Job, result: &CaptureResult) -> Self {
        Self {
            artifact: result.artifact.to_string(),
            size: result.size_bytes,
            width: result.width,
            height: result.height,
            format: result.format.to_string(),
            duration_ms: result.duration_ms,
            image_url: format!("/v1/image?id={}", job.id),
        }
    }
}

impl From<&JobError> for ErrorBody {
    fn from(error: &JobError) -> Self {
        Self {
            kind: error.kind.to_string(),
            message: error.message.clone(),
        }
    }
}

impl From<&Job> for InfoResponse {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            state: job.status.as_str().to_string(),
            url: job.url.to_string(),
            attempt: job.attempt,
            created_at: job.created_at.to_rfc3339(),
            started_at: job.started_at.map(|t| t.to_rfc3339()),
            finished_at: job.finished_at.map(|t| t.to_rfc3339()),
            result: job
                .result
                .as_ref()
                .map(|result| ResultBody::from_result(job, result)),
            error: job.error.as_ref().map(ErrorBody::from),
        }
    }
}

/// 200 once the job is terminal, 202 while it is still queued or running.
#[tracing::instrument(skip(state))]
pub async fn info_handler(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<(StatusCode, Json<InfoResponse>), ApiError> {
    let job_id = parse_job_id(query.id.as_deref())?;
    let job = state.dispatcher.info(job_id).await?;

    let status = match job.status {
        JobStatus::Done | JobStatus::Failed => StatusCode::OK,
        JobStatus::Queued | JobStatus::Running => StatusCode::ACCEPTED,
    };

    Ok((status, Json(InfoResponse::from(&job))))
}

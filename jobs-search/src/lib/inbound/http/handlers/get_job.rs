use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobId;
use crate::inbound::http::router::AppState;

pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<ApiSuccess<Job>, ApiError> {
    let job_id: JobId = job_id.parse().map_err(ApiError::UnprocessableEntity)?;

    let job = state.job_catalog.get_job(&job_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, job))
}

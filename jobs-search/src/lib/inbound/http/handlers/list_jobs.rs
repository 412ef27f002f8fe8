use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::job::models::Job;
use crate::domain::job::models::JobListingOptions;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(options): Query<JobListingOptions>,
) -> Result<ApiSuccess<Vec<Job>>, ApiError> {
    tracing::debug!(user_id = %caller.user_id, ?options, "Listing jobs");

    let jobs = state.job_catalog.list_jobs(&options).await?;

    Ok(ApiSuccess::new(StatusCode::OK, jobs))
}

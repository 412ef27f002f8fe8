use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::errors::ValidationError;
use crate::domain::job::errors::JobError;
use crate::domain::user::errors::UserError;

pub mod authenticate_user;
pub mod get_job;
pub mod list_jobs;
pub mod ping;
pub mod register_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(ValidationError),
    NotFound(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("unauthorized".to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(format!("{:#}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::message("Internal server error"),
                )
            }
            ApiError::UnprocessableEntity(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    error: e.to_string(),
                    field: Some(e.field().to_string()),
                    rule: Some(e.rule().to_string()),
                },
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorBody::message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorBody::message(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(e) => ApiError::UnprocessableEntity(e),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            UserError::HashMismatch | UserError::Internal(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Validation(e) => ApiError::UnprocessableEntity(e),
            JobError::Upstream(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ApiErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
            rule: None,
        }
    }
}

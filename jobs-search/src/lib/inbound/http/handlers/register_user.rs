use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::Credential;
use crate::domain::user::models::RegistrationRequest;
use crate::inbound::http::router::AppState;

/// Register an account and log it in straight away.
pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequestBody>,
) -> Result<ApiSuccess<Credential>, ApiError> {
    let user = state.user_service.register_user(body.into()).await?;
    let credential = state.credential_issuer.issue(&user)?;

    Ok(ApiSuccess::new(StatusCode::OK, credential))
}

/// Missing fields deserialize as empty so the `required` rule reports them.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    password_confirmation: String,
}

impl From<RegisterUserRequestBody> for RegistrationRequest {
    fn from(body: RegisterUserRequestBody) -> Self {
        RegistrationRequest::new(body.username, body.password, body.password_confirmation)
    }
}

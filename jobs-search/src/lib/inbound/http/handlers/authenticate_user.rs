use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::Credential;
use crate::domain::user::models::AuthenticationRequest;
use crate::inbound::http::router::AppState;

pub async fn authenticate_user(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateUserRequestBody>,
) -> Result<ApiSuccess<Credential>, ApiError> {
    let user = state
        .user_service
        .authenticate_user(AuthenticationRequest::new(body.username, body.password))
        .await?;
    let credential = state.credential_issuer.issue(&user)?;

    Ok(ApiSuccess::new(StatusCode::OK, credential))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateUserRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

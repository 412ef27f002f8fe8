use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate_user::authenticate_user;
use super::handlers::get_job::get_job;
use super::handlers::list_jobs::list_jobs;
use super::handlers::ping::ping;
use super::handlers::register_user::register_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::credential::CredentialIssuer;
use crate::domain::job::ports::JobCatalog;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub credential_issuer: Arc<CredentialIssuer>,
    pub job_catalog: Arc<dyn JobCatalog>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    credential_issuer: Arc<CredentialIssuer>,
    job_catalog: Arc<dyn JobCatalog>,
) -> Router {
    let state = AppState {
        user_service,
        credential_issuer,
        job_catalog,
    };

    let public_routes = Router::new()
        .route("/ping", get(ping))
        .route("/api/v1/user/registration", post(register_user))
        .route("/api/v1/user/login", post(authenticate_user));

    let protected_routes = Router::new()
        .route("/api/v1/job", get(list_jobs))
        .route("/api/v1/job/", get(list_jobs))
        .route("/api/v1/job/:job_id", get(get_job))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

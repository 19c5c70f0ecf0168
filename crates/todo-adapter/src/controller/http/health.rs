//! Operational endpoints: liveness, readiness, hello, unknown routes and methods

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use todo_domain::{IdGenerator, TodoRepository};

use super::error::ApiErrorResponse;
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse { ready: true })
}

pub async fn hello<R, G>(State(state): State<AppState<R, G>>) -> Json<HelloResponse>
where
    R: TodoRepository,
    G: IdGenerator,
{
    Json(HelloResponse {
        message: format!("Hello from {}", state.settings().advertised_addr()),
    })
}

pub async fn not_found() -> ApiErrorResponse {
    ApiErrorResponse::not_found("route not found")
}

pub async fn method_not_allowed() -> ApiErrorResponse {
    ApiErrorResponse::method_not_allowed()
}

//! Todo handlers
//!
//! Thin translation between HTTP and `TodoService`. Each handler takes the
//! request's [`RequestScope`] and passes its context down.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use todo_domain::{IdGenerator, TodoId, TodoRepository};
use todo_usecase::ServiceError;

use super::dto::{JsonBody, TitleRequest, TodoResponse};
use super::error::ApiErrorResponse;
use super::middleware::RequestScope;
use super::state::AppState;

type HandlerResult<T> = Result<T, ApiErrorResponse>;

/// Convert a service failure, logging server-side causes on the request span
fn reject(scope: &RequestScope, error: ServiceError) -> ApiErrorResponse {
    let response = ApiErrorResponse::from(error.clone());
    if response.status.is_server_error() {
        tracing::error!(parent: scope.span(), error = %error, "todo operation failed");
    }
    response
}

pub async fn create_todo<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
    JsonBody(body): JsonBody<TitleRequest>,
) -> HandlerResult<(StatusCode, Json<TodoResponse>)>
where
    R: TodoRepository,
    G: IdGenerator,
{
    let todo = state
        .service()
        .create(scope.context(), &body.title)
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

pub async fn list_todos<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
) -> HandlerResult<Json<Vec<TodoResponse>>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    let todos = state
        .service()
        .list(scope.context())
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

pub async fn get_todo<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
    Path(id): Path<String>,
) -> HandlerResult<Json<TodoResponse>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    let todo = state
        .service()
        .get(scope.context(), &TodoId::new(id))
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok(Json(todo.into()))
}

pub async fn update_todo<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TitleRequest>,
) -> HandlerResult<Json<TodoResponse>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    let todo = state
        .service()
        .update(scope.context(), &TodoId::new(id), &body.title)
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok(Json(todo.into()))
}

pub async fn complete_todo<R, G>(
    state: State<AppState<R, G>>,
    scope: RequestScope,
    id: Path<String>,
) -> HandlerResult<Json<TodoResponse>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    set_completed(state, scope, id, true).await
}

pub async fn incomplete_todo<R, G>(
    state: State<AppState<R, G>>,
    scope: RequestScope,
    id: Path<String>,
) -> HandlerResult<Json<TodoResponse>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    set_completed(state, scope, id, false).await
}

async fn set_completed<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
    Path(id): Path<String>,
    completed: bool,
) -> HandlerResult<Json<TodoResponse>>
where
    R: TodoRepository,
    G: IdGenerator,
{
    let todo = state
        .service()
        .set_completed(scope.context(), &TodoId::new(id), completed)
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok(Json(todo.into()))
}

pub async fn delete_todo<R, G>(
    State(state): State<AppState<R, G>>,
    scope: RequestScope,
    Path(id): Path<String>,
) -> HandlerResult<StatusCode>
where
    R: TodoRepository,
    G: IdGenerator,
{
    state
        .service()
        .delete(scope.context(), &TodoId::new(id))
        .await
        .map_err(|error| reject(&scope, error))?;
    Ok(StatusCode::NO_CONTENT)
}

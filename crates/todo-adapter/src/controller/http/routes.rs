//! Routing definitions
//!
//! The todo routes are served at the root and again under `/api/v1`.

use axum::routing::{get, post};
use axum::Router;

use todo_domain::{IdGenerator, TodoRepository};

use super::handlers;
use super::health;
use super::middleware::RequestContextLayer;
use super::state::AppState;

/// Build the complete router with middleware
pub fn create_router<R, G>(state: AppState<R, G>) -> Router
where
    R: TodoRepository + 'static,
    G: IdGenerator + 'static,
{
    let todos = Router::new()
        .route(
            "/todos",
            get(handlers::list_todos::<R, G>).post(handlers::create_todo::<R, G>),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<R, G>)
                .patch(handlers::update_todo::<R, G>)
                .delete(handlers::delete_todo::<R, G>),
        )
        .route(
            "/todos/{id}/complete",
            post(handlers::complete_todo::<R, G>),
        )
        .route(
            "/todos/{id}/incomplete",
            post(handlers::incomplete_todo::<R, G>),
        );

    let component = state.settings().service_name().to_string();

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/ready", get(health::ready))
        .route("/api/v0/hello", get(health::hello::<R, G>))
        .merge(todos.clone())
        .nest("/api/v1", todos)
        .fallback(health::not_found)
        .method_not_allowed_fallback(health::method_not_allowed)
        .layer(RequestContextLayer::new(component))
        .with_state(state)
}

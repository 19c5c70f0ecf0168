//! Wire types and the JSON body extractor

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use todo_domain::Todo;

use super::error::ApiErrorResponse;
use super::middleware::RequestScope;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /todos` and `PATCH /todos/{id}`
///
/// A missing `title` decodes as empty and is rejected by the service as a
/// validation error rather than as a malformed body.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleRequest {
    #[serde(default)]
    pub title: String,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().as_str().to_string(),
            title: todo.title().to_string(),
            completed: todo.completed(),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

// =============================================================================
// JsonBody
// =============================================================================

/// JSON request body that rejects with our error shape
///
/// `axum::Json` answers decode failures with plain text and 415/422; here
/// any unreadable or undecodable body is a 400 `BAD_REQUEST`. The
/// `Content-Type` header is not checked.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let scope = RequestScope::from_extensions(request.extensions());

        let bytes = Bytes::from_request(request, state).await.map_err(|rejection| {
            tracing::warn!(parent: scope.span(), error = %rejection, "failed to read request body");
            ApiErrorResponse::bad_request()
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|error| {
            tracing::warn!(parent: scope.span(), error = %error, "failed to decode request body");
            ApiErrorResponse::bad_request()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use rstest::rstest;
    use todo_domain::TodoId;

    #[rstest]
    fn test_todo_response_wire_shape() {
        let todo = Todo::restore(TodoId::new("abc"), "Ship it", true);

        let json = serde_json::to_value(TodoResponse::from(todo)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "title": "Ship it", "completed": true})
        );
    }

    #[rstest]
    fn test_title_request_missing_title_is_empty() {
        let request: TitleRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.title, "");
    }

    #[rstest]
    #[case(r#"{"title": "New Todo"}"#, true)]
    #[case(r#"{"title": "New Todo""#, false)]
    #[case("not json", false)]
    #[case(r#"{"title": 42}"#, false)]
    #[case("", false)]
    #[tokio::test]
    async fn test_json_body_decoding(#[case] body: &'static str, #[case] accepted: bool) {
        let request = Request::builder()
            .method("POST")
            .uri("/todos")
            .body(Body::from(body))
            .unwrap();

        let result = JsonBody::<TitleRequest>::from_request(request, &()).await;

        match result {
            Ok(JsonBody(decoded)) => {
                assert!(accepted);
                assert_eq!(decoded.title, "New Todo");
            }
            Err(rejection) => {
                assert!(!accepted);
                assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
                assert_eq!(rejection.error.code, "BAD_REQUEST");
            }
        }
    }
}

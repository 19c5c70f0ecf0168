//! HTTP controller
//!
//! axum router over the `TodoService`, wrapped in the request-context
//! middleware.
//!
//! ```text
//! request ──▶ RequestContextLayer ──▶ handlers ──▶ TodoService
//!               (request id, span,        │
//!                cancellation, log)       └──▶ ApiErrorResponse
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiErrorResponse};
pub use middleware::{RequestContextLayer, RequestScope, REQUEST_ID_HEADER};
pub use routes::create_router;
pub use state::{AppState, HttpSettings};

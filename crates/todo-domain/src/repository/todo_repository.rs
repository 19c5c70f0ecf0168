//! Todo Repository - Abstract persistence for Todos
//!
//! This trait defines what operations the domain needs.
//! How they're implemented (PostgreSQL, memory) is not our concern here.

use core::future::Future;

use crate::context::RequestContext;
use crate::model::todo::{Todo, TodoId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No todo stored under this id
    NotFound { id: String },
    /// The backing store failed (connectivity, constraint, encoding, lock...)
    Backend { message: String },
}

impl RepositoryError {
    pub fn not_found(id: &TodoId) -> Self {
        RepositoryError::NotFound {
            id: id.as_str().to_string(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        RepositoryError::Backend {
            message: message.into(),
        }
    }

    /// The request was abandoned before the backend answered
    pub fn cancelled() -> Self {
        Self::backend("operation cancelled")
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Todo not found: {}", id)
            }
            RepositoryError::Backend { message } => {
                write!(f, "Backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Todo Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
///
/// Methods take `&self`: implementations are shared between concurrently
/// running requests, so any mutation goes through interior locking or a
/// connection pool. Every call carries the request's [`RequestContext`];
/// backends that do real I/O should give up once it is cancelled.
pub trait TodoRepository: Send + Sync {
    /// Insert or replace a todo by id
    fn save(
        &self,
        ctx: &RequestContext,
        todo: &Todo,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Find a todo by id, `NotFound` if absent
    fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
    ) -> impl Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Every stored todo, in no particular order
    fn find_all(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<Todo>, RepositoryError>> + Send;

    /// Remove a todo, `NotFound` if absent
    fn delete(
        &self,
        ctx: &RequestContext,
        id: &TodoId,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

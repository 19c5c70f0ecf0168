//! Error types for the todo service

use thiserror::Error;
use todo_domain::RepositoryError;

/// Everything a [`TodoService`](crate::TodoService) call can fail with
///
/// The service only adds `Validation`; repository failures pass through
/// untouched so callers can still tell `NotFound` from a backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Repository(error) if error.is_not_found())
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

//! # Todo Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of data between the domain and adapters:
//! it validates input, assigns identifiers and drives every
//! read-modify-write through a [`TodoRepository`](todo_domain::TodoRepository).

mod error;
mod todo_service;

pub use error::{ServiceError, ServiceResult};
pub use todo_service::TodoService;

pub use todo_domain;

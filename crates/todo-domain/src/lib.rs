//! # Todo Domain Layer
//!
//! The heart of the todo service - entities and ports with zero external
//! dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/      - Entities (Todo)                              ││
//! │  │  repository/ - Trait definitions (not implementations)      ││
//! │  │  identity    - IdGenerator port                             ││
//! │  │  context     - RequestContext + cancellation                ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! If we switch from memory to PostgreSQL, this crate doesn't change.
//! If we swap HTTP for gRPC, this crate doesn't change.

pub mod context;
pub mod identity;
pub mod model;
pub mod repository;

// Re-export commonly used types
pub use context::{CancelOnDrop, CancellationSignal, Cancelled, RequestContext};
pub use identity::IdGenerator;
pub use model::todo::{Todo, TodoId};
pub use repository::todo_repository::{RepositoryError, TodoRepository};

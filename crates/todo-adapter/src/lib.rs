//! # Todo Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapters (HTTP)
//! - `gateway/` - Outbound adapters (id generation)
//! - `repository/` - Persistence implementations (memory, PostgreSQL)

pub mod controller;
pub mod gateway;
pub mod repository;

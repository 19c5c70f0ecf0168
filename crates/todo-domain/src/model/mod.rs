//! Domain Models - The vocabulary of the service
//!
//! These types represent the "Ubiquitous Language" of the todo service.
//! Every name here should match how we talk about the system.

pub mod todo;

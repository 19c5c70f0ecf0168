//! Gateways - Outbound adapters that aren't persistence

pub mod random_id;

pub use random_id::{random_hex_id, RandomIdGenerator};

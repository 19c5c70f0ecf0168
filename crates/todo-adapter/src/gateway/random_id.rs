//! Random id generation
//!
//! 128 bits from the thread-local CSPRNG, rendered as 32 lowercase hex
//! characters. Used for todo ids and for request ids alike.

use todo_domain::{IdGenerator, TodoId};

/// 32 lowercase hex characters of fresh randomness
pub fn random_hex_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// `IdGenerator` backed by [`random_hex_id`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> TodoId {
        TodoId::new(random_hex_id())
    }
}

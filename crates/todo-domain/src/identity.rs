//! IdGenerator port - Where new Todo ids come from
//!
//! Id generation is a side effect (randomness), so the domain only
//! names the capability. Adapters decide how ids are produced.

use crate::model::todo::TodoId;

/// Produces fresh, never-before-seen todo ids
///
/// Implementations must make collisions practically impossible
/// (at least 128 bits of entropy).
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> TodoId;
}

//! Key generators for the linklet URL record store.

pub mod random;
pub mod seq;

pub use random::{RandomKeyGenerator, RandomKeySettings};
pub use seq::SequentialKeyGenerator;

use linklet_core::UrlKey;

/// Trait for producing keys in the generated namespace.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is enforced downstream by the store's insert path, which
/// retries with a fresh key on collision.
pub trait KeyGenerator: Send + Sync + 'static {
    /// Produces a new key. Generated keys never carry the reserved marker.
    fn generate(&self) -> UrlKey;
}

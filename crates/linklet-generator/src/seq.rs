use crate::KeyGenerator;
use linklet_core::UrlKey;

/// A deterministic key generator using a sequential counter.
///
/// Produces keys like "ln000000", "ln000001", and so on. Within a single
/// instance the keys never collide, which makes this generator useful for
/// tests and single-node deployments.
///
/// For multi-node deployments, give each node a unique prefix so the
/// sequences cannot overlap.
#[derive(Debug)]
pub struct SequentialKeyGenerator {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl Clone for SequentialKeyGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(
                self.counter.load(std::sync::atomic::Ordering::SeqCst),
            ),
            prefix: self.prefix.clone(),
        }
    }
}

impl SequentialKeyGenerator {
    /// Creates a new sequential generator with the given prefix.
    ///
    /// The prefix must not start with the reserved marker; keys from this
    /// generator live in the generated namespace.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }

    /// Creates a sequential generator starting from a specific counter
    /// value, for resuming from a known state or splitting counter ranges
    /// across nodes.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl KeyGenerator for SequentialKeyGenerator {
    fn generate(&self) -> UrlKey {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        UrlKey::generated_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_keys() {
        let generator = SequentialKeyGenerator::with_prefix("ln");

        assert_eq!(generator.generate().as_str(), "ln000000");
        assert_eq!(generator.generate().as_str(), "ln000001");
        assert_eq!(generator.generate().as_str(), "ln000002");
    }

    #[test]
    fn prefix_is_embedded() {
        let generator = SequentialKeyGenerator::with_prefix("node-a");

        assert_eq!(generator.generate().as_str(), "node-a000000");
        assert_eq!(generator.generate().as_str(), "node-a000001");
    }

    #[test]
    fn offset_shifts_the_sequence() {
        let generator = SequentialKeyGenerator::with_offset("ln", 1000);

        assert_eq!(generator.generate().as_str(), "ln001000");
        assert_eq!(generator.generate().as_str(), "ln001001");
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SequentialKeyGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SequentialKeyGenerator::with_prefix("ln");
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        // Both continue from the same counter value.
        assert_eq!(generator.generate().as_str(), "ln000002");
        assert_eq!(cloned.generate().as_str(), "ln000002");
    }
}

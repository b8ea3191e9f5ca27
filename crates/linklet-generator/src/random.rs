use crate::KeyGenerator;
use linklet_core::UrlKey;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Alphabet for generated keys: case-sensitive alphanumerics.
///
/// The reserved marker is deliberately not part of the alphabet, so a
/// generated key can never land in the reserved namespace.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default key length. 62^7 possible keys keep the collision probability
/// negligible at the table sizes this store targets; collisions that do
/// happen are absorbed by the store's retry loop.
pub const DEFAULT_KEY_LENGTH: usize = 7;

/// Configures a [`RandomKeyGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomKeySettings {
    /// Number of alphabet characters per generated key.
    #[builder(default = DEFAULT_KEY_LENGTH)]
    pub length: usize,
}

/// Generates short random keys drawn from a fixed alphanumeric alphabet.
#[derive(Debug, Clone)]
pub struct RandomKeyGenerator {
    length: usize,
}

impl RandomKeyGenerator {
    pub fn new(settings: RandomKeySettings) -> Self {
        Self {
            length: settings.length,
        }
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new(RandomKeySettings::builder().build())
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> UrlKey {
        let mut rng = rand::thread_rng();
        let key: String = (0..self.length)
            .map(|_| {
                let index = rng.gen_range(0..ALPHABET.len());
                ALPHABET[index] as char
            })
            .collect();
        UrlKey::generated_unchecked(key)
    }
}

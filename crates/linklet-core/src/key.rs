use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Marker character prefixed to caller-supplied keys in storage.
pub const RESERVED_MARKER: char = '$';

const MIN_RESERVED_LENGTH: usize = 1;
const MAX_RESERVED_LENGTH: usize = 32;

/// A key identifying a stored URL record.
///
/// Two namespaces exist: `Generated` keys are produced by a key generator
/// and carry no marker; `Reserved` keys are caller-supplied and stored with
/// a leading `$`, so the two namespaces can never collide and the origin of
/// a key stays visible without an extra schema field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrlKey {
    /// A generator-produced key, stored as-is.
    Generated(String),
    /// A caller-supplied key, held in its marked storage form (`$name`).
    Reserved(String),
}

impl UrlKey {
    /// Creates a reserved key from a caller-supplied name after validation.
    ///
    /// Valid names are 1-32 characters of `[a-zA-Z0-9_-]`; the marker is
    /// prepended here, the caller never supplies it.
    pub fn reserved(name: impl AsRef<str>) -> Result<Self, CoreError> {
        let name = name.as_ref();
        Self::validate_name(name)?;
        Ok(Self::Reserved(format!("{RESERVED_MARKER}{name}")))
    }

    /// Wraps a generator-produced key without validation.
    ///
    /// Use this only for keys from trusted generators, which never produce
    /// the reserved marker.
    pub fn generated_unchecked(key: impl Into<String>) -> Self {
        Self::Generated(key.into())
    }

    /// Parses a key in the storage form returned by the Set operation.
    ///
    /// A leading marker maps back to the reserved namespace, anything else
    /// to the generated one.
    pub fn parse(key: &str) -> Self {
        if key.starts_with(RESERVED_MARKER) {
            Self::Reserved(key.to_owned())
        } else {
            Self::Generated(key.to_owned())
        }
    }

    /// Returns the key in its storage form.
    pub fn as_str(&self) -> &str {
        match self {
            UrlKey::Generated(key) | UrlKey::Reserved(key) => key.as_str(),
        }
    }

    /// Whether this key was explicitly chosen by a caller.
    pub fn is_reserved(&self) -> bool {
        matches!(self, UrlKey::Reserved(_))
    }

    fn validate_name(name: &str) -> Result<(), CoreError> {
        if name.len() < MIN_RESERVED_LENGTH || name.len() > MAX_RESERVED_LENGTH {
            return Err(CoreError::InvalidKey(format!(
                "length must be between {} and {}, got {}",
                MIN_RESERVED_LENGTH,
                MAX_RESERVED_LENGTH,
                name.len()
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CoreError::InvalidKey(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                name
            )));
        }

        Ok(())
    }
}

impl Display for UrlKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_key_carries_marker() {
        let key = UrlKey::reserved("abc").unwrap();
        assert_eq!(key.as_str(), "$abc");
        assert!(key.is_reserved());
    }

    #[test]
    fn valid_reserved_names() {
        assert!(UrlKey::reserved("a").is_ok());
        assert!(UrlKey::reserved("Abc-123_xyz").is_ok());
        assert!(UrlKey::reserved("a".repeat(32)).is_ok());
    }

    #[test]
    fn empty_reserved_name_is_rejected() {
        assert!(UrlKey::reserved("").is_err());
    }

    #[test]
    fn too_long_reserved_name_is_rejected() {
        assert!(UrlKey::reserved("a".repeat(33)).is_err());
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(UrlKey::reserved("abc def").is_err());
        assert!(UrlKey::reserved("abc/def").is_err());
        assert!(UrlKey::reserved("$abc").is_err());
    }

    #[test]
    fn generated_key_has_no_marker() {
        let key = UrlKey::generated_unchecked("k1AB2c3");
        assert_eq!(key.as_str(), "k1AB2c3");
        assert!(!key.is_reserved());
    }

    #[test]
    fn parse_maps_marker_to_reserved() {
        assert!(matches!(UrlKey::parse("$abc"), UrlKey::Reserved(_)));
        assert!(matches!(UrlKey::parse("k1AB2c3"), UrlKey::Generated(_)));
    }

    #[test]
    fn parse_roundtrips_storage_form() {
        let key = UrlKey::reserved("abc").unwrap();
        assert_eq!(UrlKey::parse(key.as_str()), key);
    }

    #[test]
    fn display_matches_storage_form() {
        let key = UrlKey::reserved("abc").unwrap();
        assert_eq!(key.to_string(), "$abc");
    }

    #[test]
    fn namespaces_never_collide() {
        // A reserved key always starts with the marker; generators draw
        // from an alphabet that excludes it.
        let reserved = UrlKey::reserved("abc").unwrap();
        let generated = UrlKey::generated_unchecked("abc");
        assert_ne!(reserved.as_str(), generated.as_str());
    }
}

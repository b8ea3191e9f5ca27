use linklet_core::CoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("given key does not exist or expired")]
    KeyNotFound,
    #[error("key already taken: {0}")]
    DuplicateKey(String),
    #[error("key assignment exhausted after {attempts} attempts")]
    KeyAssignmentExhausted { attempts: u32 },
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<CoreError> for StoreError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidKey(message) => Self::InvalidKey(message),
        }
    }
}

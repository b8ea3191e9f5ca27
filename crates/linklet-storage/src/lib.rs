//! Storage backends implementing the linklet backing-store contract.

pub mod memory;
pub mod mysql;

pub use linklet_core::{StorageError, UrlCollection, UrlRecord};
pub use memory::InMemoryCollection;
pub use mysql::MySqlCollection;

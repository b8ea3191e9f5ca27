//! Core types and contracts for the linklet URL record store.
//!
//! This crate provides the data model, the backing-store contract, and the
//! usage counters shared by the store service and its storage backends.

pub mod collection;
pub mod error;
pub mod key;
pub mod record;
pub mod usage;

pub use collection::UrlCollection;
pub use error::{CoreError, StorageError};
pub use key::{UrlKey, RESERVED_MARKER};
pub use record::UrlRecord;
pub use usage::Usage;

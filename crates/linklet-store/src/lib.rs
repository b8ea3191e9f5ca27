//! The linklet URL record store service.
//!
//! Given a long URL, the store produces or accepts a short key, persists
//! the mapping with optional expiration, and serves lookups while tracking
//! per-key visit counts.

pub mod error;
pub mod service;
pub mod store;

pub use error::StoreError;
pub use service::{UrlStoreService, DEFAULT_MAX_KEY_ATTEMPTS};
pub use store::{SetParams, UrlStore};

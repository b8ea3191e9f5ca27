//! Disposable service fixtures for linklet integration tests.

pub mod error;
pub mod mysql;

pub use error::{Result, TestInfraError};
pub use mysql::{MySqlServer, MysqlConfig};

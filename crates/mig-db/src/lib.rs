//! mig-db - Database abstraction layer for mig
//!
//! This crate provides the `Database` trait (the handle migrations are
//! applied through) and implementations for MySQL and DuckDB.

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod mysql;
pub mod traits;

pub use connect::connect;
pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use mysql::{MySqlBackend, MySqlSettings};
pub use traits::Database;

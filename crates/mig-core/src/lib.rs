//! mig-core - Core library for mig
//!
//! This crate provides configuration parsing, the migration file naming
//! scheme, migration set discovery with conflict detection, and the
//! persisted version marker. It has no database dependency.

pub mod config;
pub mod error;
pub mod migration_set;
pub mod naming;
pub mod version_marker;

pub use config::{Config, DatabaseConfig, DbType};
pub use error::{CoreError, CoreResult};
pub use migration_set::{Conflict, MigrationFile, MigrationSet};
pub use naming::{
    normalize_description, validate_description, NamingScheme, Version, DEFAULT_FILE_PREFIX,
    DEFAULT_FILE_SUFFIX, DEFAULT_VERSION_WIDTH,
};
pub use version_marker::{next_version, VersionMarker, DEFAULT_VERSION_FILE};

//! Configuration types and parsing for mig.yml

use crate::error::{CoreError, CoreResult};
use crate::naming::NamingScheme;
use crate::version_marker::DEFAULT_VERSION_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in the project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["mig.yml", "mig.yaml"];

/// Environment variable consulted when the config omits the password
pub const PASSWORD_ENV_VAR: &str = "MIG_DB_PASSWORD";

/// Main project configuration from mig.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Directory holding migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Version marker file, relative to the project root
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Migration file naming scheme
    #[serde(default)]
    pub naming: NamingScheme,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// MySQL / MariaDB (default)
    #[default]
    MySql,
    /// DuckDB
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::MySql => write!(f, "mysql"),
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type (mysql or duckdb)
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Server host (mysql)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (mysql)
    #[serde(default = "default_port")]
    pub port: u16,

    /// User name (mysql)
    #[serde(default = "default_username")]
    pub username: String,

    /// Password (mysql); falls back to MIG_DB_PASSWORD when absent
    #[serde(default)]
    pub password: Option<String>,

    /// Target schema (mysql)
    #[serde(default)]
    pub database: Option<String>,

    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Seconds to wait for the server before giving up (mysql)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: None,
            database: None,
            path: default_db_path(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// Password from the config file, or from MIG_DB_PASSWORD.
    ///
    /// An empty string is returned when neither is set.
    pub fn resolve_password(&self) -> String {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV_VAR).ok())
            .unwrap_or_default()
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_username() -> String {
    "root".to_string()
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_version_file() -> String {
    DEFAULT_VERSION_FILE.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for mig.yml or mig.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(invalid("migrations_dir cannot be empty"));
        }

        if self.version_file.trim().is_empty() {
            return Err(invalid("version_file cannot be empty"));
        }

        if self.naming.prefix.is_empty() {
            return Err(invalid("naming.prefix cannot be empty"));
        }

        if self.naming.min_width == 0 {
            return Err(invalid("naming.min_width must be at least 1"));
        }

        if self.database.db_type == DbType::MySql
            && self
                .database
                .database
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
        {
            return Err(invalid(
                "database.database is required when database.type is mysql",
            ));
        }

        Ok(())
    }

    /// Get the absolute migrations directory relative to a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Get the absolute version marker path relative to a project root
    pub fn version_file_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.version_file)
    }

    /// Database configuration with a relative DuckDB path anchored at `root`
    pub fn database_for_root(&self, root: &Path) -> DatabaseConfig {
        let mut database = self.database.clone();
        if database.db_type == DbType::DuckDb && database.path != DEFAULT_DB_PATH {
            database.path = root.join(&database.path).display().to_string();
        }
        database
    }
}

fn invalid(message: &str) -> CoreError {
    CoreError::ConfigInvalid {
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

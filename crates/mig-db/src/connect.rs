//! Backend selection from configuration

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::mysql::{MySqlBackend, MySqlSettings};
use crate::traits::Database;
use mig_core::{DatabaseConfig, DbType};

/// Open a database handle for the configured backend
pub async fn connect(config: &DatabaseConfig) -> DbResult<Box<dyn Database>> {
    log::debug!("Opening {} database handle", config.db_type);
    match config.db_type {
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(&config.path)?)),
        DbType::MySql => {
            let settings = MySqlSettings::from_config(config);
            Ok(Box::new(MySqlBackend::connect(&settings).await?))
        }
    }
}

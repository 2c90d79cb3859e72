//! MySQL database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use mig_core::DatabaseConfig;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Executor;
use std::time::Duration;

/// Connection settings for a MySQL server
#[derive(Debug, Clone)]
pub struct MySqlSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub connect_timeout: Duration,
}

impl MySqlSettings {
    /// Build settings from the database section of mig.yml
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.resolve_password(),
            database: config.database.clone().unwrap_or_default(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

/// MySQL database backend
///
/// Holds a pool capped at one connection, so every script runs on the same
/// session in submission order.
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Connect to the server described by `settings`
    pub async fn connect(settings: &MySqlSettings) -> DbResult<Self> {
        log::debug!(
            "Connecting to mysql://{}@{}:{}/{}",
            settings.username,
            settings.host,
            settings.port,
            settings.database
        );
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(settings.connect_timeout)
            .connect_with(settings.connect_options())
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute_script(&self, sql: &str) -> DbResult<()> {
        // A plain &str goes over the text protocol, which accepts
        // multi-statement scripts.
        self.pool
            .execute(sql)
            .await
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[path = "mysql_test.rs"]
mod tests;

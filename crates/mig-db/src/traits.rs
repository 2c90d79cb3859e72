//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database handle used to apply migrations
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a whole migration script.
    ///
    /// The script is submitted as one batch and may hold several statements.
    async fn execute_script(&self, sql: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Release the underlying connection
    async fn close(&self) {}
}

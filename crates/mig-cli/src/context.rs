//! Runtime context for CLI commands

use anyhow::{Context, Result};
use mig_core::{Config, NamingScheme, VersionMarker};
use mig_db::Database;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// On-disk locations a command works with
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Directory holding migration files
    pub migrations_dir: PathBuf,

    /// Persisted version marker
    pub marker: VersionMarker,

    /// Migration file naming scheme
    pub scheme: NamingScheme,
}

impl ProjectLayout {
    /// Resolve the layout of a project rooted at `root`
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self {
            migrations_dir: config.migrations_dir_absolute(root),
            marker: VersionMarker::new(config.version_file_absolute(root)),
            scheme: config.naming.clone(),
        }
    }
}

/// Runtime context containing the project layout and the database handle
pub struct RuntimeContext {
    /// Resolved project paths
    pub layout: ProjectLayout,

    /// Database connection
    pub db: Box<dyn Database>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Load configuration and connect to the database.
    ///
    /// Fails before any migration logic runs if the database is unreachable.
    pub async fn new(args: &GlobalArgs) -> Result<Self> {
        let root = args.project_dir.as_path();

        let config = if let Some(config_path) = &args.config {
            Config::load(config_path).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(root).context("Failed to load project configuration")?
        };

        let db = mig_db::connect(&config.database_for_root(root))
            .await
            .context("Failed to connect to the database")?;

        Ok(Self {
            layout: ProjectLayout::from_config(&config, root),
            db,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Release the database handle
    pub async fn close(self) {
        self.db.close().await;
    }
}

//! Run command implementation - applies pending migrations in order

use anyhow::{Context, Result};
use mig_core::{MigrationSet, Version};
use mig_db::Database;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::ExitCode;
use crate::context::{ProjectLayout, RuntimeContext};

/// Terminal, non-error result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    /// At least one migration was applied
    Applied {
        /// File names in the order they ran
        files: Vec<String>,
        /// Version after the last applied migration
        version: Version,
    },
    /// Nothing was pending
    UpToDate { version: Version },
}

/// Execute the run command
pub(crate) async fn execute(_args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.verbose(&format!(
        "Applying migrations from {} to {} database",
        ctx.layout.migrations_dir.display(),
        ctx.db.db_type()
    ));

    let result = apply_pending(ctx.db.as_ref(), &ctx.layout).await;
    ctx.close().await;

    match result? {
        RunOutcome::Applied { files, version } => {
            log::info!(
                "Applied {} migration(s), database is now at version {}",
                files.len(),
                version
            );
            println!("Migration complete.");
        }
        RunOutcome::UpToDate { version } => {
            log::info!("Database is at version {}", version);
            println!("Your database is up-to-date.");
        }
    }
    Ok(())
}

/// Apply every pending migration of `layout` through `db`.
///
/// Duplicate versions stop the run before anything executes. Each applied
/// migration is recorded in the version marker right away, so a later
/// failure keeps earlier progress.
pub(crate) async fn apply_pending(db: &dyn Database, layout: &ProjectLayout) -> Result<RunOutcome> {
    let set = MigrationSet::load(&layout.migrations_dir, &layout.scheme)
        .context("Failed to list migration files")?;
    let mut version = layout
        .marker
        .read()
        .context("Failed to read the current version")?;

    let conflicts = set.conflicts();
    if !conflicts.is_empty() {
        println!(
            "Error: You have multiple files using the same version. \
             To resolve, move some of the files up so each one gets a unique version."
        );
        for conflict in &conflicts {
            println!("  {}", conflict);
        }
        return Err(ExitCode(1).into());
    }

    let mut applied = Vec::new();
    for file in set.files() {
        if file.version <= version {
            log::debug!(
                "Skipping {} (version {} <= {})",
                file.file_name,
                file.version,
                version
            );
            continue;
        }

        println!("Running: {}", file.file_name);
        let script = file
            .read_script()
            .with_context(|| format!("Failed to read migration {}", file.file_name))?;

        if let Err(e) = db.execute_script(&script).await {
            println!("Migration failed: {}", e);
            println!("Aborting.");
            return Err(ExitCode(1).into());
        }
        println!("Done.");

        version = file.version;
        applied.push(file.file_name.clone());

        // A failed marker write does not stop the run; the next invocation
        // will see the older version and may re-apply this script.
        if let Err(e) = layout.marker.write(version) {
            eprintln!(
                "Failed to output new version to {}: {}",
                layout.marker.path().display(),
                e
            );
        }
    }

    if applied.is_empty() {
        Ok(RunOutcome::UpToDate { version })
    } else {
        Ok(RunOutcome::Applied {
            files: applied,
            version,
        })
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;

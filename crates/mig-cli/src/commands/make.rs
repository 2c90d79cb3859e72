//! Make command implementation - scaffolds a new migration file

use anyhow::{Context, Result};
use mig_core::{next_version, normalize_description, validate_description, MigrationSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{GlobalArgs, MakeArgs};
use crate::commands::common::ExitCode;
use crate::context::{ProjectLayout, RuntimeContext};

/// Body written into every new migration file
pub(crate) const PLACEHOLDER: &str = "-- WRITE YOUR QUERY HERE...\n";

/// Execute the make command
pub(crate) async fn execute(args: &MakeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    ctx.verbose(&format!(
        "Migrations directory: {}",
        ctx.layout.migrations_dir.display()
    ));

    let result = make_migration(&ctx.layout, &args.description());
    ctx.close().await;
    result.map(|_| ())
}

/// Create the next migration file and return its path.
///
/// Never overwrites an existing file and never touches the database.
pub(crate) fn make_migration(layout: &ProjectLayout, raw_description: &str) -> Result<PathBuf> {
    let description = normalize_description(raw_description);
    validate_description(&description)?;

    let current = layout
        .marker
        .read()
        .context("Failed to read the current version")?;
    println!("Current database version is: {}", current);

    let set = MigrationSet::load(&layout.migrations_dir, &layout.scheme)
        .context("Failed to list migration files")?;
    let version = next_version(current, &set)?;
    log::debug!(
        "Next version {} (marker {}, highest file {:?})",
        version,
        current,
        set.max_version()
    );

    if !layout.migrations_dir.exists() {
        fs::create_dir_all(&layout.migrations_dir).with_context(|| {
            format!(
                "Failed to create migrations directory: {}",
                layout.migrations_dir.display()
            )
        })?;
    }

    let path = layout
        .migrations_dir
        .join(layout.scheme.file_name_for(version, &description));
    println!("Adding a new migration script: {}", path.display());

    match write_new_file(&path, PLACEHOLDER) {
        Ok(()) => {
            println!("Done.");
            Ok(path)
        }
        Err(e) => {
            println!("Failed.");
            eprintln!("  {}: {}", path.display(), e);
            Err(ExitCode(1).into())
        }
    }
}

/// Write `content` to a file that must not exist yet.
///
/// A file left half written by a failed write is removed again.
fn write_new_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = file.write_all(content.as_bytes()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
#[path = "make_test.rs"]
mod tests;

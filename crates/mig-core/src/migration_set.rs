//! Discovery and ordering of migration files
//!
//! The migration set is every entry in the migrations directory whose name
//! starts with the configured prefix, sorted by file name. Because versions
//! are zero-padded, file name order is version order for anything `make`
//! produced.

use crate::error::{CoreError, CoreResult};
use crate::naming::{NamingScheme, Version};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A single migration script on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// File name within the migrations directory
    pub file_name: String,

    /// Full path to the file
    pub path: PathBuf,

    /// Version parsed from the file name (0 when malformed)
    pub version: Version,

    /// Description parsed from the file name
    pub description: String,
}

impl MigrationFile {
    /// Build a migration file entry from its location on disk
    pub fn new(dir: &Path, file_name: &str, scheme: &NamingScheme) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: dir.join(file_name),
            version: scheme.parse_version(file_name),
            description: scheme.parse_description(file_name),
        }
    }

    /// Read the full script text
    pub fn read_script(&self) -> CoreResult<String> {
        fs::read_to_string(&self.path).map_err(|e| CoreError::io_at(&self.path, e))
    }
}

/// Two neighbouring files (in sorted order) that resolve to the same version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The file that sorts first
    pub first: String,

    /// The file that sorts second
    pub second: String,

    /// The version both files claim
    pub version: Version,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --- {}", self.first, self.second)
    }
}

/// All migration files of a project, sorted by file name
#[derive(Debug, Clone, Default)]
pub struct MigrationSet {
    files: Vec<MigrationFile>,
}

impl MigrationSet {
    /// Load the migration set from `dir`.
    ///
    /// A missing directory is an empty set. Subdirectories and names that
    /// are not valid UTF-8 are skipped.
    pub fn load(dir: &Path, scheme: &NamingScheme) -> CoreResult<Self> {
        if !dir.exists() {
            log::debug!(
                "Migrations directory {} does not exist, no migrations found",
                dir.display()
            );
            return Ok(Self::default());
        }

        let entries = fs::read_dir(dir).map_err(|e| CoreError::io_at(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CoreError::io_at(dir, e))?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            let os_name = entry.file_name();
            let Some(file_name) = os_name.to_str() else {
                log::warn!(
                    "Skipping migration entry with a non UTF-8 name: {}",
                    entry.path().display()
                );
                continue;
            };

            if scheme.is_candidate(file_name) {
                files.push(MigrationFile::new(dir, file_name, scheme));
            }
        }

        Ok(Self::from_files(files))
    }

    /// Build a set from already discovered files, sorting them by name
    pub fn from_files(mut files: Vec<MigrationFile>) -> Self {
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Self { files }
    }

    /// Files in ascending file name order, which is the order a run visits
    /// them in. Names past the padding width can put a higher version first.
    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    /// Highest version among the files, independent of what has been applied
    pub fn max_version(&self) -> Option<Version> {
        self.files.iter().map(|f| f.version).max()
    }

    /// Every pair of adjacent files sharing a version.
    ///
    /// A non-empty result must stop a run before anything executes.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.files
            .windows(2)
            .filter(|pair| pair[0].version == pair[1].version)
            .map(|pair| Conflict {
                first: pair[0].file_name.clone(),
                second: pair[1].file_name.clone(),
                version: pair[0].version,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "migration_set_test.rs"]
mod tests;

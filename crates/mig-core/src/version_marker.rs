//! Persisted version marker
//!
//! The marker is a small text file holding the decimal version of the
//! database. It is created on the first successful migration and
//! overwritten after every later one.

use crate::error::{CoreError, CoreResult};
use crate::migration_set::MigrationSet;
use crate::naming::{parse_leading_integer, Version};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default file name of the version marker
pub const DEFAULT_VERSION_FILE: &str = ".version";

/// Handle to the version marker file
#[derive(Debug, Clone)]
pub struct VersionMarker {
    path: PathBuf,
}

impl VersionMarker {
    /// Create a marker handle for `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the marker file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current version.
    ///
    /// A missing marker means nothing has been applied yet (version 0).
    /// Only the first line is considered, and unparseable content is 0.
    /// Bytes that are not valid UTF-8 never make the marker unreadable.
    pub fn read(&self) -> CoreResult<Version> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CoreError::io_at(&self.path, e)),
        };
        let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
        Ok(parse_leading_integer(&String::from_utf8_lossy(first_line)))
    }

    /// Overwrite the marker with `version`
    pub fn write(&self, version: Version) -> CoreResult<()> {
        fs::write(&self.path, version.to_string()).map_err(|e| CoreError::io_at(&self.path, e))
    }
}

/// Version the next `make` should use.
///
/// Files can exist beyond the applied version (created but never run), so
/// the larger of the two wins. Fails once the version space is used up.
pub fn next_version(current: Version, set: &MigrationSet) -> CoreResult<Version> {
    let highest = current.max(set.max_version().unwrap_or(0));
    highest
        .checked_add(1)
        .ok_or(CoreError::VersionExhausted { version: highest })
}

#[cfg(test)]
#[path = "version_marker_test.rs"]
mod tests;

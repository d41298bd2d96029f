//! Validate the source folder before any work is done.
//!

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::BackupError;

/// Check that `source` exists and is a directory, returning its canonical path.
///
/// Symbolic links to directories are followed. A missing path, a file, or a
/// broken link is a [`BackupError::SourceNotFound`] naming `source` as given.
pub fn validate_source(source: &Path) -> Result<PathBuf, BackupError> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(error) => {
            debug!("Could not get source '{}' metadata: {error}", source.display());
            return Err(BackupError::SourceNotFound(source.to_path_buf()));
        }
    };

    if !metadata.is_dir() {
        return Err(BackupError::SourceNotFound(source.to_path_buf()));
    }

    fs::canonicalize(source).map_err(|error| {
        debug!("Could not canonicalize source '{}': {error}", source.display());
        BackupError::SourceNotFound(source.to_path_buf())
    })
}

//! Backup a folder from start to finish.
//!

use std::{
    env, io,
    path::{self, PathBuf},
};

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    archive::{ArchiveSummary, Archiver, CompressionLevel},
    file_name::{format_timestamp, output_file_name},
    preflight::validate_source,
    size::{SizeReport, format_size, scan_size},
};

/// A request to back up a folder.
#[derive(Debug, Clone)]
pub struct BackupRequest {
    /// The folder to back up, as given by the user.
    pub source: PathBuf,

    /// The directory to write the archive to, the current directory if `None`.
    pub output_directory: Option<PathBuf>,

    /// How much effort to spend compressing.
    pub compression_level: CompressionLevel,

    /// When the backup started, used to name the archive.
    pub started_at: NaiveDateTime,
}

/// A completed backup.
#[derive(Debug, Clone)]
pub struct BackupOutcome {
    /// The folder that was backed up, as given by the user.
    pub source: PathBuf,

    /// The absolute path of the archive.
    pub output_path: PathBuf,

    /// The size of the source before compression, if it could be calculated.
    pub size: Option<SizeReport>,

    /// What the archiver wrote.
    pub summary: ArchiveSummary,
}

/// Validate, measure and archive the source folder of a request.
///
/// Fails before writing anything if the source is not a directory. Failing to
/// measure the source is only logged.
pub fn run_backup<A: Archiver>(
    archiver: &A,
    request: &BackupRequest,
) -> Result<BackupOutcome, BackupError> {
    let source = validate_source(&request.source)?;

    let timestamp = format_timestamp(&request.started_at);
    let file_name = output_file_name(&source.to_string_lossy(), &timestamp);
    let output_directory = match &request.output_directory {
        Some(directory) => path::absolute(directory),
        None => env::current_dir(),
    }
    .map_err(BackupError::OutputDirectory)?;
    let output_path = output_directory.join(file_name);

    info!("Calculating size of '{}'", source.display());
    let size = match scan_size(&source) {
        Ok(report) => {
            info!("Source size: {}", format_size(report.bytes));
            if report.skipped > 0 {
                warn!("Skipped {} unreadable entries while calculating size", report.skipped);
            }
            Some(report)
        }
        Err(error) => {
            warn!("Could not calculate source size: {error}");
            None
        }
    };

    info!(
        "Compressing to '{}' with {} compression",
        output_path.display(),
        request.compression_level
    );
    let summary = archiver
        .archive(&source, &output_path, request.compression_level)
        .map_err(|error| BackupError::Archive(Box::new(error)))?;

    Ok(BackupOutcome {
        source: request.source.clone(),
        output_path,
        size,
        summary,
    })
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Source folder does not exist or is not a directory: '{}'", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to resolve the output directory:\n{0}")]
    OutputDirectory(#[source] io::Error),

    #[error("Failed to create the archive:\n{0}")]
    Archive(#[source] Box<dyn core::error::Error + Send + Sync>),
}

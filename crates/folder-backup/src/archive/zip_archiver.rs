use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Datelike, Local, Timelike};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;
use zip::{
    CompressionMethod, DateTime as ZipDateTime, ZipWriter, result::ZipError,
    write::SimpleFileOptions,
};

use super::{ArchiveSummary, Archiver, CompressionLevel};

/// DEFLATE level used for [`CompressionLevel::Fastest`].
const FASTEST_DEFLATE_LEVEL: i64 = 1;

/// Zip a folder's contents.
#[derive(Default, Debug, Clone, Copy)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    type Error = ArchiveError;

    fn archive(
        &self,
        source: &Path,
        destination: &Path,
        level: CompressionLevel,
    ) -> Result<ArchiveSummary, Self::Error> {
        let file = File::create(destination).map_err(|source| ArchiveError::CreateArchive {
            path: destination.to_path_buf(),
            source,
        })?;

        let result = Self::write_archive(file, source, destination, level);

        // The writer finalizes on drop, so a failed archive still looks valid.
        if result.is_err() {
            if let Err(error) = fs::remove_file(destination) {
                warn!(
                    "Could not remove incomplete archive '{}': {error}",
                    destination.display()
                );
            }
        }

        result
    }
}

impl ZipArchiver {
    /// The entry options for a compression level.
    fn options(level: CompressionLevel) -> SimpleFileOptions {
        let options = SimpleFileOptions::default();

        match level {
            CompressionLevel::None => options.compression_method(CompressionMethod::Stored),
            CompressionLevel::Fastest => options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(FASTEST_DEFLATE_LEVEL)),
            CompressionLevel::Optimal => options.compression_method(CompressionMethod::Deflated),
        }
    }

    /// Write the contents of `source` to the newly created `file`.
    fn write_archive(
        file: File,
        source: &Path,
        destination: &Path,
        level: CompressionLevel,
    ) -> Result<ArchiveSummary, ArchiveError> {
        let destination = fs::canonicalize(destination).ok();

        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = Self::options(level);
        let mut summary = ArchiveSummary::default();

        let entries = WalkDir::new(source)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_symlink() {
                warn!("Skipping symbolic link '{}'", path.display());
                continue;
            }

            if !file_type.is_dir() && !file_type.is_file() {
                warn!("Skipping special file '{}'", path.display());
                continue;
            }

            if file_type.is_file() && is_same_file(path, destination.as_deref()) {
                debug!("Skipping the archive being written '{}'", path.display());
                continue;
            }

            let name = entry_name(source, path);
            let metadata = entry.metadata()?;

            let modified = metadata.modified().ok().and_then(zip_time).unwrap_or_else(|| {
                trace!("'{name}' modified time is not representable, using the minimum");
                ZipDateTime::default()
            });
            let options = options.last_modified_time(modified);

            #[cfg(unix)]
            let options = {
                use std::os::unix::fs::PermissionsExt;
                options.unix_permissions(metadata.permissions().mode())
            };

            if file_type.is_dir() {
                zip.add_directory(format!("{name}/"), options)?;
                summary.directories += 1;
                continue;
            }

            let mut input = File::open(path).map_err(|source| ArchiveError::ReadEntry {
                path: path.to_path_buf(),
                source,
            })?;

            let options = options.large_file(metadata.len() >= u64::from(u32::MAX));
            zip.start_file(name, options)?;
            io::copy(&mut input, &mut zip).map_err(|source| ArchiveError::WriteEntry {
                path: path.to_path_buf(),
                source,
            })?;

            summary.files += 1;
        }

        let mut writer = zip.finish()?;
        writer.flush().map_err(ArchiveError::Flush)?;

        Ok(summary)
    }
}

/// The name of an entry inside the archive, relative to the source with `/` separators.
fn entry_name(source: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source).unwrap_or(path);

    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// If `path` is the archive currently being written.
fn is_same_file(path: &Path, destination: Option<&Path>) -> bool {
    let Some(destination) = destination else {
        return false;
    };

    if path.file_name() != destination.file_name() {
        return false;
    }

    fs::canonicalize(path).is_ok_and(|path| path == destination)
}

/// Convert a modified time to a zip timestamp, if the format can represent it.
///
/// Zip timestamps cannot represent times before 1980.
fn zip_time(modified: SystemTime) -> Option<ZipDateTime> {
    let local = DateTime::<Local>::from(modified);

    ZipDateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to create archive '{}':\n{source}", .path.display())]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read the source folder:\n{0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read '{}':\n{source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}' to the archive:\n{source}", .path.display())]
    WriteEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write the archive:\n{0}")]
    Zip(#[from] ZipError),

    #[error("Failed to flush the archive:\n{0}")]
    Flush(#[source] io::Error),
}

//! Best effort size of a folder before it is compressed.
//!

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// The result of scanning a folder's size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeReport {
    /// The total length of every regular file that could be read.
    pub bytes: u64,

    /// The number of entries that were skipped because they could not be read.
    pub skipped: u64,
}

/// Sum the length of every regular file under `folder`.
///
/// Symbolic links are not followed or counted. Entries that cannot be read are
/// skipped, only failing to read `folder` itself is an error.
pub fn scan_size(folder: &Path) -> Result<SizeReport, SizeScanError> {
    let mut report = SizeReport::default();

    for entry in WalkDir::new(folder).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                if error.depth() == 0 {
                    return Err(SizeScanError {
                        folder: folder.to_path_buf(),
                        source: error,
                    });
                }
                debug!("Skipping unreadable entry: {error}");
                report.skipped += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => report.bytes = report.bytes.saturating_add(metadata.len()),
            Err(error) => {
                debug!("Could not get '{}' metadata: {error}", entry.path().display());
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Format a number of bytes with binary prefixes and two decimals.
///
/// Values under 1 KB are shown as whole bytes.
#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }

    let mut value = bytes as f64;
    let mut unit = "bytes";
    for next in UNITS {
        // Compare the rounded value so nothing is shown as 1024.00 of a unit.
        if round_to_hundredths(value) < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }

    format!("{value:.2} {unit}")
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The folder being scanned could not be read.
#[derive(Debug, Error)]
#[error("Failed to scan '{}': {source}", .folder.display())]
pub struct SizeScanError {
    /// The folder that was scanned.
    pub folder: PathBuf,

    /// The underlying walk error.
    #[source]
    pub source: walkdir::Error,
}

//! Archivers that compress a folder into a single file.
//!

use core::{error::Error, fmt};
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod mock;
mod zip_archiver;

pub use zip_archiver::{ArchiveError, ZipArchiver};

/// How much effort to spend compressing.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Store entries without compressing them.
    None,

    /// Compress quickly at the cost of a larger archive.
    #[default]
    Fastest,

    /// Balance archive size against time taken.
    Optimal,
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Fastest => write!(f, "fastest"),
            Self::Optimal => write!(f, "optimal"),
        }
    }
}

/// What an archiver wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// The number of files written to the archive.
    pub files: u64,

    /// The number of directories written to the archive.
    pub directories: u64,
}

/// Something that can compress a folder's contents into a single file.
pub trait Archiver {
    /// Error variants.
    type Error: Error + Send + Sync + 'static;

    /// Archive the contents of `source` into `destination`.
    ///
    /// The archive root is the contents of `source`, not `source` itself. An
    /// existing file at `destination` is overwritten.
    fn archive(
        &self,
        source: &Path,
        destination: &Path,
        level: CompressionLevel,
    ) -> Result<ArchiveSummary, Self::Error>;
}

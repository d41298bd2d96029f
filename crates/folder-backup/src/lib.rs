//! # folder-backup
//! Archive a folder into a timestamped zip file in the current directory.
//!

pub mod archive;
pub mod backup;
pub mod config;
pub mod file_name;
pub mod input;
mod logger;
pub mod preflight;
pub mod size;

pub use archive::{ArchiveError, ArchiveSummary, Archiver, CompressionLevel, ZipArchiver};
pub use backup::{BackupError, BackupOutcome, BackupRequest, run_backup};
pub use config::{Config, LoadConfigError, SaveConfigError};
pub use logger::{LoggerError, init_logger};

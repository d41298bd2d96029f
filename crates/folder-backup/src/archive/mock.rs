//! An archiver that records what it was asked to do.
//!

use core::cell::RefCell;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::{ArchiveSummary, Archiver, CompressionLevel};

/// The contents the mock writes to its destination.
pub const MOCK_CONTENTS: &[u8] = b"mock archive";

/// A call made to a [`MockArchiver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// The folder that would have been archived.
    pub source: PathBuf,

    /// Where the archive was written.
    pub destination: PathBuf,

    /// The requested compression level.
    pub level: CompressionLevel,
}

/// Mock an archiver.
///
/// Writes [`MOCK_CONTENTS`] to the destination, or fails without writing
/// anything when `fail` is set.
#[derive(Default, Debug)]
pub struct MockArchiver {
    /// If every call should fail.
    pub fail: bool,

    calls: RefCell<Vec<MockCall>>,
}

impl MockArchiver {
    /// Create a mock that always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: RefCell::default(),
        }
    }

    /// The calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }
}

impl Archiver for MockArchiver {
    type Error = MockArchiveError;

    fn archive(
        &self,
        source: &Path,
        destination: &Path,
        level: CompressionLevel,
    ) -> Result<ArchiveSummary, Self::Error> {
        self.calls.borrow_mut().push(MockCall {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            level,
        });

        if self.fail {
            return Err(MockArchiveError::Requested);
        }

        fs::write(destination, MOCK_CONTENTS)?;

        Ok(ArchiveSummary {
            files: 1,
            directories: 0,
        })
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum MockArchiveError {
    #[error("Mock archiver was asked to fail")]
    Requested,

    #[error("Failed to write mock archive:\n{0}")]
    Write(#[from] io::Error),
}

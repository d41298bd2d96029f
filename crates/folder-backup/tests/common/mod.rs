//! # common
//!

#![allow(dead_code)]

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
    sync::Once,
};

use chrono::{NaiveDate, NaiveDateTime};
use folder_backup::init_logger;
use tracing::Level;
use zip::ZipArchive;

static LOGGER: Once = Once::new();

/// Log everything to stdout for the rest of the test binary.
pub fn init_test_logger() {
    LOGGER.call_once(|| {
        if let Ok(guard) = init_logger(Level::TRACE) {
            // Keep the writer alive for the remaining tests.
            core::mem::forget(guard);
        }
    });
}

/// The start time used for backups in tests, 2025-06-23 14:30:00.
pub fn started_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 23)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

/// Create a small folder tree with nested, empty and populated directories.
///
/// Contains 18 bytes across three files.
pub fn create_tree(root: &Path) {
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("a.txt"), "Contents").unwrap();
    fs::write(root.join("nested/b.txt"), "More").unwrap();
    fs::write(root.join("nested/deeper/c.txt"), "Deeper").unwrap();
}

/// The entry names of a zip archive.
pub fn zip_entry_names(path: &Path) -> BTreeSet<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(String::from).collect()
}

/// Read an entry of a zip archive to a string.
pub fn read_zip_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}

/// The names of the files directly inside a directory.
pub fn directory_listing(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Create `name` under `root` holding 100 bytes, then remove all its permissions.
///
/// Returns `None` if the directory is still readable, as it is for root.
#[cfg(unix)]
pub fn create_unreadable_directory(root: &Path, name: &str) -> Option<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let directory = root.join(name);
    fs::create_dir_all(&directory).unwrap();
    fs::write(directory.join("hidden.bin"), vec![0u8; 100]).unwrap();
    fs::set_permissions(&directory, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&directory).is_ok() {
        restore_permissions(&directory);
        return None;
    }

    Some(directory)
}

/// Make a directory from [`create_unreadable_directory`] removable again.
#[cfg(unix)]
pub fn restore_permissions(directory: &Path) {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(directory, fs::Permissions::from_mode(0o755)).unwrap();
}

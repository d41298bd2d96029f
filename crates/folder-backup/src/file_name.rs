//! Derive the output file name of a backup.
//!

use chrono::NaiveDateTime;

/// Marker between the timestamp and the folder name.
const BACKUP_MARKER: &str = "BKP";

/// The extension of every backup archive.
const EXTENSION: &str = "zip";

/// Format a time as a fixed width `YYYYMMDDHHMMSS` string.
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format("%Y%m%d%H%M%S").to_string()
}

/// The final segment of a path, ignoring trailing separators.
///
/// Both `/` and `\` are treated as separators so the result does not depend on
/// the host platform. A bare drive such as `C:` has no leaf.
pub fn leaf_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let leaf = trimmed.rsplit(['/', '\\']).next().unwrap_or_default();

    let is_drive = leaf.len() == 2
        && leaf.ends_with(':')
        && leaf.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if is_drive { "" } else { leaf }
}

/// Reduce a name to ASCII letters, digits and single underscores.
///
/// Every other character becomes an underscore, runs of underscores collapse
/// into one, and underscores are stripped from both ends.
pub fn sanitize(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());

    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(c);
    }

    sanitized.trim_matches('_').to_string()
}

/// The archive file name for a source folder at a given timestamp.
///
/// `{timestamp}-BKP-{name}.zip`, or `{timestamp}-BKP.zip` when nothing of the
/// folder's name survives sanitization.
pub fn output_file_name(source: &str, timestamp: &str) -> String {
    let name = sanitize(leaf_name(source));

    if name.is_empty() {
        format!("{timestamp}-{BACKUP_MARKER}.{EXTENSION}")
    } else {
        format!("{timestamp}-{BACKUP_MARKER}-{name}.{EXTENSION}")
    }
}

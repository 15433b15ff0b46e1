//! Sentinel version file reading

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the trimmed first line of a version file.
///
/// Returns None when the file is absent, unreadable or empty; the
/// caller treats all three as "no local version".
pub fn read_first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

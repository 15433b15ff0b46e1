//! Service unit counting
//!
//! Multi-instance installations create suffixed units such as
//! `klipper-1.service` next to the plain `klipper.service`; both count
//! as an instance of the component.

use crate::probe::ServiceProbe;
use regex::Regex;
use std::path::PathBuf;

/// Installed-unit probe over a systemd unit directory
#[derive(Debug, Clone)]
pub struct UnitDir {
    dir: PathBuf,
}

impl UnitDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ServiceProbe for UnitDir {
    fn count_units(&self, stem: &str) -> usize {
        let pattern = format!(r"^{}(-[0-9a-zA-Z]+)?\.service$", regex::escape(stem));
        let pattern = Regex::new(&pattern).expect("unit pattern is valid");

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        entries
            .filter_map(Result::ok)
            .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
            .count()
    }
}

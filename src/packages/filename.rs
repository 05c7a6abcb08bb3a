// src/packages/filename.rs

//! Package metadata from archive file names
//!
//! Archives are named `name#version-release.pkg.tar.<compression>`, which
//! is the only place name, version and release are recorded for an archive
//! that has not been installed.

use crate::error::Result;
use regex::Regex;
use std::path::Path;
use tracing::warn;

/// Name, version and release taken from an archive file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    pub name: String,
    pub version: String,
    pub release: u32,
}

/// Compiled archive filename pattern
///
/// Capture groups 1, 2 and 3 are the name, version and release.
#[derive(Debug, Clone)]
pub struct ArchiveNamePattern {
    regex: Regex,
}

impl ArchiveNamePattern {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Split a bare file name, if it matches
    pub fn parse(&self, file_name: &str) -> Option<ArchiveName> {
        let caps = self.regex.captures(file_name)?;
        let name = caps.get(1)?.as_str();
        let version = caps.get(2)?.as_str();
        let release = caps.get(3)?.as_str();

        Some(ArchiveName {
            name: name.to_string(),
            version: version.to_string(),
            release: release.parse().unwrap_or(0),
        })
    }

    /// Split the file name of `path`, falling back for unconventional names
    ///
    /// A name that does not match keeps its file name, minus any tar
    /// suffix, as the package name with an empty version and release 0.
    pub fn parse_path(&self, path: &Path) -> ArchiveName {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(parsed) = self.parse(&file_name) {
            return parsed;
        }

        warn!(
            "Archive name '{}' does not match the package name pattern",
            file_name
        );

        ArchiveName {
            name: strip_tar_suffix(&file_name).to_string(),
            version: String::new(),
            release: 0,
        }
    }
}

fn strip_tar_suffix(file_name: &str) -> &str {
    [".pkg.tar", ".tar"]
        .iter()
        .find_map(|suffix| file_name.find(suffix).map(|i| &file_name[..i]))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
}

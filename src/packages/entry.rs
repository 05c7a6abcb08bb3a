// src/packages/entry.rs

//! Archive entry metadata

use crate::filesystem::FileType;

/// Header metadata for a single archive entry
///
/// This is everything the indexer needs from the archive reader; entry
/// payloads are never read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path as stored in the archive, e.g. `usr/bin/foo` or `usr/bin/`
    pub path: String,
    /// Type bits plus permission and special bits
    pub mode: u32,
    pub uid: u64,
    pub gid: u64,
    pub size: u64,
    /// Target of a symbolic link
    pub symlink: Option<String>,
    /// Path of an earlier entry this one is a hard link to
    pub hardlink: Option<String>,
    pub device_major: u32,
    pub device_minor: u32,
}

impl ArchiveEntry {
    /// Create an entry with the given path and mode and no link or device data
    pub fn new(path: &str, mode: u32) -> Self {
        Self {
            path: path.to_string(),
            mode,
            ..Self::default()
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_mode(self.mode)
    }
}

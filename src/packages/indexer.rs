// src/packages/indexer.rs

//! Archive indexing
//!
//! Turns the entry stream of a package archive into either a plain
//! [`PackageRecord`] (file listing) or per-entry [`ArchiveFileInfo`]
//! values for footprints.

use super::archive::PackageArchive;
use super::entry::ArchiveEntry;
use super::filename::ArchiveNamePattern;
use crate::db::PackageRecord;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Footprint metadata for one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFileInfo {
    pub mode: u32,
    pub uid: u64,
    pub gid: u64,
    pub path: String,
    pub is_hardlink: bool,
    /// Symlink target
    pub link_target: Option<String>,
    /// Zero-sized regular file (never set for hard links)
    pub is_empty: bool,
    pub device_major: u32,
    pub device_minor: u32,
}

/// Builds [`ArchiveFileInfo`] values during a single pass over an archive
///
/// Hard links take the mode of the entry they point at. Modes are kept in
/// a path map as entries go by; the first entry seen for a path wins, and a
/// link to a path not seen yet keeps mode 0.
#[derive(Debug, Default)]
pub struct FootprintIndexer {
    modes: HashMap<String, u32>,
}

impl FootprintIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next entry in archive order
    pub fn index(&mut self, entry: ArchiveEntry) -> ArchiveFileInfo {
        let (mode, is_hardlink, is_empty) = match &entry.hardlink {
            Some(target) => {
                let mode = self.modes.get(target).copied().unwrap_or_else(|| {
                    debug!(
                        "Hard link target '{}' of '{}' not seen yet",
                        target, entry.path
                    );
                    0
                });
                (mode, true, false)
            }
            None => (entry.mode, false, entry.size == 0),
        };

        self.modes.entry(entry.path.clone()).or_insert(mode);

        ArchiveFileInfo {
            mode,
            uid: entry.uid,
            gid: entry.gid,
            path: entry.path,
            is_hardlink,
            link_target: entry.symlink,
            is_empty,
            device_major: entry.device_major,
            device_minor: entry.device_minor,
        }
    }
}

/// Build a package record from an entry stream, keeping only paths
pub fn record_from_entries<I>(
    name: String,
    version: String,
    release: u32,
    entries: I,
) -> Result<PackageRecord>
where
    I: IntoIterator<Item = Result<ArchiveEntry>>,
{
    let files = entries
        .into_iter()
        .map(|entry| entry.map(|e| e.path))
        .collect::<Result<Vec<_>>>()?;

    Ok(PackageRecord::new(name, version, release, files))
}

/// Build a package record straight from an archive file
///
/// Name, version and release come from the archive's file name.
pub fn package_from_archive(path: &Path, pattern: &ArchiveNamePattern) -> Result<PackageRecord> {
    debug!("Indexing package archive: {}", path.display());

    let mut archive = PackageArchive::open(path)?;
    let name = pattern.parse_path(path);
    let record = record_from_entries(name.name, name.version, name.release, archive.entries()?)?;

    debug!(
        "Indexed package {} {}-{} ({} files)",
        record.name,
        record.version,
        record.release,
        record.files.len()
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::filesystem::mode::{S_IFLNK, S_IFREG};

    fn file_infos(entries: Vec<Result<ArchiveEntry>>) -> Result<Vec<ArchiveFileInfo>> {
        let mut indexer = FootprintIndexer::new();
        entries
            .into_iter()
            .map(|entry| entry.map(|e| indexer.index(e)))
            .collect()
    }

    fn hardlink(path: &str, target: &str) -> ArchiveEntry {
        ArchiveEntry {
            hardlink: Some(target.to_string()),
            ..ArchiveEntry::new(path, S_IFREG | 0o644)
        }
    }

    #[test]
    fn test_hardlink_inherits_target_mode() {
        let mut file = ArchiveEntry::new("usr/bin/gzip", S_IFREG | 0o4711);
        file.size = 1024;

        let infos = file_infos(vec![
            Ok(file),
            Ok(hardlink("usr/bin/gunzip", "usr/bin/gzip")),
        ])
        .unwrap();

        assert_eq!(infos[1].mode, S_IFREG | 0o4711);
        assert!(infos[1].is_hardlink);
        assert!(!infos[1].is_empty);
    }

    #[test]
    fn test_hardlink_to_unseen_path_keeps_zero_mode() {
        // Current behavior: forward references are not resolved
        let infos = file_infos(vec![
            Ok(hardlink("usr/bin/gunzip", "usr/bin/gzip")),
            Ok(ArchiveEntry::new("usr/bin/gzip", S_IFREG | 0o755)),
        ])
        .unwrap();

        assert_eq!(infos[0].mode, 0);
        assert!(infos[0].is_hardlink);
        assert_eq!(infos[1].mode, S_IFREG | 0o755);
    }

    #[test]
    fn test_first_seen_path_governs() {
        let infos = file_infos(vec![
            Ok(ArchiveEntry::new("etc/conf", S_IFREG | 0o600)),
            Ok(ArchiveEntry::new("etc/conf", S_IFREG | 0o644)),
            Ok(hardlink("etc/conf.bak", "etc/conf")),
        ])
        .unwrap();

        assert_eq!(infos[2].mode, S_IFREG | 0o600);
    }

    #[test]
    fn test_chained_hardlinks() {
        let infos = file_infos(vec![
            Ok(ArchiveEntry::new("a", S_IFREG | 0o750)),
            Ok(hardlink("b", "a")),
            Ok(hardlink("c", "b")),
        ])
        .unwrap();

        assert_eq!(infos[2].mode, S_IFREG | 0o750);
    }

    #[test]
    fn test_empty_and_symlink_metadata() {
        let mut link = ArchiveEntry::new("usr/lib/libz.so", S_IFLNK | 0o777);
        link.symlink = Some("libz.so.1".to_string());

        let infos = file_infos(vec![
            Ok(ArchiveEntry::new("etc/empty", S_IFREG | 0o644)),
            Ok(link),
        ])
        .unwrap();

        assert!(infos[0].is_empty);
        assert_eq!(infos[1].link_target.as_deref(), Some("libz.so.1"));
    }

    #[test]
    fn test_record_from_entries_keeps_order() {
        let record = record_from_entries(
            "foo".to_string(),
            "1.0".to_string(),
            1,
            vec![
                Ok(ArchiveEntry::new("usr/", 0)),
                Ok(ArchiveEntry::new("usr/bin/", 0)),
                Ok(ArchiveEntry::new("usr/bin/foo", 0)),
            ],
        )
        .unwrap();

        assert_eq!(record.files, vec!["usr/", "usr/bin/", "usr/bin/foo"]);
    }

    #[test]
    fn test_entry_error_stops_indexing() {
        let result = file_infos(vec![
            Ok(ArchiveEntry::new("usr/", 0)),
            Err(Error::ArchiveError("truncated".to_string())),
            Ok(ArchiveEntry::new("usr/bin/", 0)),
        ]);
        assert!(matches!(result, Err(Error::ArchiveError(_))));
    }
}

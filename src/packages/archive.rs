// src/packages/archive.rs

//! Package archive reader
//!
//! Opens `.pkg.tar.*` files, autodetecting the compression filter from
//! magic bytes (plain tar when none match), and yields header metadata for
//! each entry in archive order. Payloads are skipped.

use super::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::filesystem::FileType;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tar::{Archive, EntryType};
use tracing::debug;
use xz2::read::XzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const BZIP2_MAGIC: [u8; 3] = *b"BZh";
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression filter wrapped around the tar stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Zstd,
}

impl Compression {
    /// Pick the filter from the first bytes of an archive
    ///
    /// Anything unrecognised, including a file shorter than every magic
    /// sequence, is read as a bare tar stream.
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            Compression::Gzip
        } else if bytes.starts_with(&BZIP2_MAGIC) {
            Compression::Bzip2
        } else if bytes.starts_with(&XZ_MAGIC) {
            Compression::Xz
        } else if bytes.starts_with(&ZSTD_MAGIC) {
            Compression::Zstd
        } else {
            Compression::None
        }
    }

    /// Wrap a reader with the matching decompression layer
    fn wrap_reader<R: Read + 'static>(self, reader: R) -> Result<Box<dyn Read>> {
        Ok(match self {
            Compression::None => Box::new(reader),
            Compression::Gzip => Box::new(GzDecoder::new(reader)),
            Compression::Bzip2 => Box::new(BzDecoder::new(reader)),
            Compression::Xz => Box::new(XzDecoder::new(reader)),
            Compression::Zstd => {
                let decoder = zstd::Decoder::new(reader).map_err(|e| {
                    Error::ArchiveError(format!("Failed to create zstd decoder: {}", e))
                })?;
                Box::new(decoder)
            }
        })
    }
}

/// An opened package archive
pub struct PackageArchive {
    path: PathBuf,
    compression: Compression,
    archive: Archive<Box<dyn Read>>,
}

impl PackageArchive {
    /// Open an archive, detecting its compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            Error::ArchiveError(format!(
                "Failed to open archive '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut reader = BufReader::new(file);
        let magic = reader.fill_buf().map_err(|e| {
            Error::ArchiveError(format!(
                "Failed to read archive '{}': {}",
                path.display(),
                e
            ))
        })?;
        let compression = Compression::from_magic_bytes(magic);
        debug!("Opening {} ({:?} compression)", path.display(), compression);

        Ok(Self {
            path: path.to_path_buf(),
            compression,
            archive: Archive::new(compression.wrap_reader(reader)?),
        })
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Iterate over entry headers in archive order
    ///
    /// The archive is a single forward stream, so this can only be walked
    /// once per opened archive.
    pub fn entries(&mut self) -> Result<ArchiveEntries<'_>> {
        let entries = self.archive.entries().map_err(|e| {
            Error::ArchiveError(format!(
                "Failed to read archive '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(ArchiveEntries {
            inner: entries,
            path: &self.path,
        })
    }
}

/// Iterator over the entries of a [`PackageArchive`]
pub struct ArchiveEntries<'a> {
    inner: tar::Entries<'a, Box<dyn Read>>,
    path: &'a Path,
}

impl Iterator for ArchiveEntries<'_> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(Error::ArchiveError(format!(
                        "Failed to read archive entry in '{}': {}",
                        self.path.display(),
                        e
                    ))));
                }
            };

            // pax global headers carry no file
            if entry.header().entry_type() == EntryType::XGlobalHeader {
                continue;
            }

            return Some(read_entry(&entry).map_err(|e| {
                Error::ArchiveError(format!(
                    "Failed to read entry header in '{}': {}",
                    self.path.display(),
                    e
                ))
            }));
        }
    }
}

/// File type implied by a tar entry type
///
/// Hard links are regular files that share another entry's data.
fn file_type_of(entry_type: EntryType) -> FileType {
    match entry_type {
        EntryType::Regular | EntryType::Continuous | EntryType::GNUSparse | EntryType::Link => {
            FileType::Regular
        }
        EntryType::Directory => FileType::Directory,
        EntryType::Symlink => FileType::Symlink,
        EntryType::Char => FileType::CharDevice,
        EntryType::Block => FileType::BlockDevice,
        EntryType::Fifo => FileType::Fifo,
        _ => FileType::Unknown,
    }
}

fn read_entry<R: Read>(entry: &tar::Entry<'_, R>) -> std::io::Result<ArchiveEntry> {
    let header = entry.header();
    let entry_type = header.entry_type();
    let file_type = file_type_of(entry_type);

    let mode = (header.mode()? & 0o7777) | file_type.bits();

    let link_target = entry
        .link_name_bytes()
        .map(|name| String::from_utf8_lossy(&name).into_owned());
    let (symlink, hardlink) = match entry_type {
        EntryType::Symlink => (link_target, None),
        EntryType::Link => (None, link_target),
        _ => (None, None),
    };

    // Device fields are often left blank on non-device entries
    let (device_major, device_minor) = if file_type.is_device() {
        (
            header.device_major().ok().flatten().unwrap_or(0),
            header.device_minor().ok().flatten().unwrap_or(0),
        )
    } else {
        (0, 0)
    };

    Ok(ArchiveEntry {
        path: String::from_utf8_lossy(&entry.path_bytes()).into_owned(),
        mode,
        uid: header.uid()?,
        gid: header.gid()?,
        size: entry.size(),
        symlink,
        hardlink,
        device_major,
        device_minor,
    })
}

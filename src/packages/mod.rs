// src/packages/mod.rs

//! Package archive support
//!
//! This module reads `.pkg.tar.*` package archives directly, without the
//! package database: listing the files an archive holds and reporting its
//! footprint.

pub mod archive;
pub mod entry;
pub mod filename;
pub mod footprint;
pub mod indexer;

pub use archive::{Compression, PackageArchive};
pub use entry::ArchiveEntry;
pub use filename::{ArchiveName, ArchiveNamePattern};
pub use indexer::{ArchiveFileInfo, FootprintIndexer, package_from_archive};

// src/query.rs

//! Package queries
//!
//! The report operations of `pkginfo`: installed packages, files of a
//! package, owners of files matching a pattern, and archive footprints.
//! Reports are written to any [`Write`] so they can be captured in tests.

use crate::config::Config;
use crate::db::{self, PackageDatabase, PackageRecord};
use crate::error::Result;
use crate::filesystem::IdentityResolver;
use crate::packages::{ArchiveNamePattern, footprint, package_from_archive};
use regex::Regex;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Header of the package column in owner reports
const PACKAGE_HEADER: &str = "Package";
const FILE_HEADER: &str = "File";

/// A file matched by an owner search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerMatch {
    pub package: String,
    /// File path as stored in the database (relative)
    pub file: String,
}

/// Outcome of a file listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// Files were listed from an archive file
    Archive(usize),
    /// Files were listed from the installed package database
    Installed(usize),
    /// Neither an installed package nor an existing file
    NotFound,
}

/// Write `name version-release` for every record, in database order
pub fn write_installed<W: Write>(db: &PackageDatabase, out: &mut W) -> Result<()> {
    for record in db {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

/// Write the files of a record, one per line, in stored order
pub fn write_files<W: Write>(record: &PackageRecord, out: &mut W) -> Result<()> {
    for file in &record.files {
        writeln!(out, "{}", file)?;
    }
    Ok(())
}

/// Find every stored file whose absolute path matches `pattern`
///
/// Matches are returned package-major, then in file order. A pattern that
/// fails to compile is an error, distinct from an empty result.
pub fn find_owners(db: &PackageDatabase, pattern: &str) -> Result<Vec<OwnerMatch>> {
    let regex = Regex::new(pattern)?;
    let mut matches = Vec::new();

    for record in db {
        for file in &record.files {
            if regex.is_match(&format!("/{}", file)) {
                matches.push(OwnerMatch {
                    package: record.name.clone(),
                    file: file.clone(),
                });
            }
        }
    }

    debug!("Pattern '{}' matched {} files", pattern, matches.len());
    Ok(matches)
}

/// Write a two-column owner table
///
/// Nothing at all is written when there are no matches. Otherwise the
/// package column is as wide as the longest package name, and never
/// narrower than its header.
pub fn write_owner_table<W: Write>(matches: &[OwnerMatch], out: &mut W) -> Result<()> {
    if matches.is_empty() {
        return Ok(());
    }

    // Widths are in characters, matching how `{:<width$}` pads, so
    // non-ASCII names still line up
    let width = matches
        .iter()
        .map(|m| m.package.chars().count())
        .fold(PACKAGE_HEADER.len(), usize::max);

    writeln!(out, "{:<width$}  {}", PACKAGE_HEADER, FILE_HEADER)?;
    for m in matches {
        writeln!(out, "{:<width$}  {}", m.package, m.file)?;
    }

    Ok(())
}

/// Runs queries against the configured database and archives
#[derive(Debug, Clone)]
pub struct QueryEngine {
    config: Config,
}

impl QueryEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// List every installed package
    pub fn list_installed<W: Write>(&self, out: &mut W) -> Result<usize> {
        let db = db::open_configured(&self.config)?;
        write_installed(&db, out)?;
        Ok(db.len())
    }

    /// List the files of an archive path or an installed package
    ///
    /// An existing file is always read as an archive, before the database
    /// is consulted. An unknown name gets a diagnostic on `out`, which is
    /// not an error.
    pub fn list_files<W: Write>(&self, target: &str, out: &mut W) -> Result<ListOutcome> {
        let path = Path::new(target);
        if path.exists() {
            let pattern = ArchiveNamePattern::new(&self.config.archive_pattern)?;
            let record = package_from_archive(path, &pattern)?;
            write_files(&record, out)?;
            return Ok(ListOutcome::Archive(record.files.len()));
        }

        let db = db::open_configured(&self.config)?;
        match db.find_by_name(target) {
            Some(record) => {
                write_files(record, out)?;
                Ok(ListOutcome::Installed(record.files.len()))
            }
            None => {
                writeln!(
                    out,
                    "pkginfo: {} is neither an installed package nor a package file",
                    target
                )?;
                Ok(ListOutcome::NotFound)
            }
        }
    }

    /// List owners of installed files matching `pattern`
    pub fn list_owners<W: Write>(&self, pattern: &str, out: &mut W) -> Result<usize> {
        let db = db::open_configured(&self.config)?;
        let matches = find_owners(&db, pattern)?;
        write_owner_table(&matches, out)?;
        Ok(matches.len())
    }

    /// Print the footprint of an archive
    pub fn footprint<W: Write>(
        &self,
        archive: &Path,
        ids: &dyn IdentityResolver,
        out: &mut W,
    ) -> Result<usize> {
        footprint::footprint_archive(out, archive, ids)
    }
}

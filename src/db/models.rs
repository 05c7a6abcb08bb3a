// src/db/models.rs

//! Data models for the package database
//!
//! A database is an ordered list of package records, kept in the order they
//! appear in the database file.

use std::fmt;

/// One installed (or archived) package and the files it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub release: u32,
    /// Relative paths (no leading `/`), in stored order, duplicates kept
    pub files: Vec<String>,
}

impl PackageRecord {
    /// Create a new PackageRecord
    pub fn new(name: String, version: String, release: u32, files: Vec<String>) -> Self {
        Self {
            name,
            version,
            release,
            files,
        }
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.name, self.version, self.release)
    }
}

/// Ordered collection of package records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDatabase {
    records: Vec<PackageRecord>,
}

impl PackageDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping file order
    ///
    /// Names are not checked for uniqueness.
    pub fn push(&mut self, record: PackageRecord) {
        self.records.push(record);
    }

    /// Find the first record with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&PackageRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// All records in database order
    pub fn records(&self) -> &[PackageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageRecord> {
        self.records.iter()
    }
}

impl FromIterator<PackageRecord> for PackageDatabase {
    fn from_iter<I: IntoIterator<Item = PackageRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PackageDatabase {
    type Item = &'a PackageRecord;
    type IntoIter = std::slice::Iter<'a, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

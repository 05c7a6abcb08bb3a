// src/db/mod.rs

//! Package database layer
//!
//! This module handles reading the flat-file package database:
//! - Locating the database (default path or under an alternate root)
//! - Parsing it into an in-memory [`PackageDatabase`]
//! - Name lookups on the parsed records
//!
//! The database is only ever read; each query loads it once and drops it
//! when done.

pub mod models;
pub mod parser;

pub use models::{PackageDatabase, PackageRecord};
pub use parser::DatabaseParser;

use crate::config::Config;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Open and parse the package database at `db_path`
///
/// # Arguments
///
/// * `db_path` - Path to the database file
///
/// # Returns
///
/// * `Result<PackageDatabase>` - All committed records, in file order
pub fn open<P: AsRef<Path>>(db_path: P) -> Result<PackageDatabase> {
    let db_path = db_path.as_ref();
    debug!("Using package database '{}'", db_path.display());

    let file = File::open(db_path)
        .map_err(|e| Error::DatabaseNotFound(format!("{}: {}", db_path.display(), e)))?;

    let database = parser::parse(BufReader::new(file))?;

    debug!(
        "Found {} packages in the package database",
        database.len()
    );

    Ok(database)
}

/// Open the database named by a [`Config`], honouring its alternate root
pub fn open_configured(config: &Config) -> Result<PackageDatabase> {
    open(config.database_path())
}

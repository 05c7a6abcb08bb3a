// src/lib.rs

//! pkgutils
//!
//! Read-only queries over a local package inventory: which packages are
//! installed, which files a package owns, who owns a file, and what an
//! archive would place on disk.
//!
//! # Architecture
//!
//! - Flat-file database: one text file of records, parsed once per query
//! - Archives read directly: `.pkg.tar.{gz,bz2,xz,zst}`, no database needed
//! - Read-only: each query loads the database, reports, and exits

pub mod config;
pub mod db;
mod error;
pub mod filesystem;
pub mod packages;
pub mod query;

pub use config::Config;
pub use error::{Error, Result};
pub use query::QueryEngine;

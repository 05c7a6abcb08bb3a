// src/error.rs

use thiserror::Error;

/// Core error types for pkgutils
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database not found
    #[error("Failed to open the package database: {0}")]
    DatabaseNotFound(String),

    /// Database could not be read once opened
    #[error("Failed to read the package database: {0}")]
    DatabaseRead(String),

    /// Package archive could not be opened or decoded
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// Regular expression failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type alias using pkgutils' Error type
pub type Result<T> = std::result::Result<T, Error>;

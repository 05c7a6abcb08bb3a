// src/config.rs

//! Process-wide settings
//!
//! The database location and the archive filename pattern are plain values
//! here rather than literals scattered through the code, so the binary can
//! override them from flags and tests can point them at fixtures.

use std::path::{Path, PathBuf};

/// Default location of the package database
pub const DEFAULT_DB_PATH: &str = "/var/lib/pkg/db";

/// Default pattern for `name#version-release.pkg.tar.<compression>` file names
pub const DEFAULT_ARCHIVE_PATTERN: &str =
    r"^([A-Za-z0-9_][A-Za-z0-9_-]*)#(.+)-([0-9]+)\.pkg\.tar\.[gxb]z2?$";

/// Settings for a single query invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Alternate installation root, if any
    pub root: Option<PathBuf>,
    /// Database path, relative to `root` when one is set
    pub db_path: PathBuf,
    /// Regular expression used to split archive file names
    pub archive_pattern: String,
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            root: None,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            archive_pattern: DEFAULT_ARCHIVE_PATTERN.to_string(),
        }
    }

    /// Use an alternate installation root
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Use a different database location
    pub fn with_db_path<P: Into<PathBuf>>(mut self, db_path: P) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Use a different archive filename pattern
    pub fn with_archive_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.archive_pattern = pattern.into();
        self
    }

    /// Location of the database file, honouring the alternate root
    ///
    /// The database path is placed underneath the root even when it is
    /// absolute, so `/mnt` with the default path gives `/mnt/var/lib/pkg/db`.
    pub fn database_path(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.join(strip_root(&self.db_path)),
            None => self.db_path.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_root(path: &Path) -> &Path {
    path.strip_prefix("/").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path() {
        let config = Config::default();
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/pkg/db"));
    }

    #[test]
    fn test_database_path_under_root() {
        let config = Config::new().with_root("/mnt");
        assert_eq!(config.database_path(), PathBuf::from("/mnt/var/lib/pkg/db"));

        // Trailing slash on the root makes no difference
        let config = Config::new().with_root("/mnt/");
        assert_eq!(config.database_path(), PathBuf::from("/mnt/var/lib/pkg/db"));
    }

    #[test]
    fn test_relative_db_path_under_root() {
        let config = Config::new().with_root("/srv/chroot").with_db_path("pkg/db");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/chroot/pkg/db")
        );
    }

    #[test]
    fn test_db_path_override_without_root() {
        let config = Config::new().with_db_path("/tmp/db");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/db"));
    }
}

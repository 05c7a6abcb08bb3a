// src/db/parser.rs

//! Flat-file package database parser
//!
//! The database is a sequence of records, each laid out as
//!
//! ```text
//! <name>
//! <version>-<release>
//! <relative/file/path>
//! ...
//! <blank line>
//! ```
//!
//! A record is only committed when its terminating blank line is seen; a
//! trailing record without one is dropped.

use super::models::{PackageDatabase, PackageRecord};
use crate::error::{Error, Result};
use std::io::BufRead;
use tracing::{debug, warn};

/// Parser state, carrying the record being assembled
#[derive(Debug)]
enum State {
    /// Expecting a package name
    Name,
    /// Name read, expecting `<version>-<release>`
    VersionRelease { name: String },
    /// Collecting file paths until a blank line
    Files(PackageRecord),
}

/// Line-driven state machine building a [`PackageDatabase`]
#[derive(Debug)]
pub struct DatabaseParser {
    state: State,
    database: PackageDatabase,
    line_number: usize,
}

impl DatabaseParser {
    pub fn new() -> Self {
        Self {
            state: State::Name,
            database: PackageDatabase::new(),
            line_number: 0,
        }
    }

    /// Feed one line, without its trailing newline
    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;

        self.state = match std::mem::replace(&mut self.state, State::Name) {
            State::Name if line.is_empty() => State::Name,
            State::Name => State::VersionRelease {
                name: line.to_string(),
            },
            State::VersionRelease { name } if line.is_empty() => {
                warn!(
                    "Package '{}' has no version line (line {}), recording it without files",
                    name, self.line_number
                );
                self.database
                    .push(PackageRecord::new(name, String::new(), 0, Vec::new()));
                State::Name
            }
            State::VersionRelease { name } => {
                let (version, release) = split_version_release(line);
                State::Files(PackageRecord::new(name, version, release, Vec::new()))
            }
            State::Files(record) if line.is_empty() => {
                self.database.push(record);
                State::Name
            }
            State::Files(mut record) => {
                record.files.push(line.to_string());
                State::Files(record)
            }
        };
    }

    /// Finish parsing and return the committed records
    pub fn finish(self) -> PackageDatabase {
        match self.state {
            State::Name => {}
            State::VersionRelease { name } => {
                debug!("Dropping unterminated record '{}' at end of database", name);
            }
            State::Files(record) => {
                debug!(
                    "Dropping unterminated record '{}' ({} files) at end of database",
                    record.name,
                    record.files.len()
                );
            }
        }

        self.database
    }
}

impl Default for DatabaseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a database from a buffered reader
///
/// Lines are split on `\n` only and decoded lossily, so stray bytes in a
/// path never abort the read.
pub fn parse<R: BufRead>(reader: R) -> Result<PackageDatabase> {
    let mut parser = DatabaseParser::new();

    for line in reader.split(b'\n') {
        let line = line.map_err(|e| {
            Error::DatabaseRead(format!(
                "line {}: {}",
                parser.line_number + 1,
                e
            ))
        })?;
        parser.feed_line(&String::from_utf8_lossy(&line));
    }

    Ok(parser.finish())
}

/// Parse a database held in memory
pub fn parse_str(content: &str) -> PackageDatabase {
    let mut parser = DatabaseParser::new();
    for line in content.split_terminator('\n') {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Split `<version>-<release>` at the last `-`
///
/// A line without `-` is taken as a bare version with release 0.
pub fn split_version_release(line: &str) -> (String, u32) {
    match line.rsplit_once('-') {
        Some((version, release)) => (version.to_string(), parse_release(release)),
        None => (line.to_string(), 0),
    }
}

/// Leading decimal digits of `s`, or 0 when there are none
fn parse_release(s: &str) -> u32 {
    let digits = s.trim_start();
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_two_records() {
        let content = "foo\n1.0-1\nbin/foo\netc/foo.conf\n\nbar\n2.1-3\nbin/bar\n\n";
        let db = parse_str(content);

        assert_eq!(db.len(), 2);
        let foo = &db.records()[0];
        assert_eq!(foo.name, "foo");
        assert_eq!(foo.version, "1.0");
        assert_eq!(foo.release, 1);
        assert_eq!(foo.files, vec!["bin/foo", "etc/foo.conf"]);

        let bar = &db.records()[1];
        assert_eq!(bar.name, "bar");
        assert_eq!(bar.release, 3);
        assert_eq!(bar.files, vec!["bin/bar"]);
    }

    #[test]
    fn test_n_records_with_m_files() {
        let mut content = String::new();
        for n in 0..5 {
            content.push_str(&format!("pkg{}\n1.{}-{}\n", n, n, n + 1));
            for m in 0..7 {
                content.push_str(&format!("usr/share/pkg{}/file{}\n", n, m));
            }
            content.push('\n');
        }

        let db = parse(Cursor::new(content)).unwrap();
        assert_eq!(db.len(), 5);
        for (n, record) in db.iter().enumerate() {
            assert_eq!(record.name, format!("pkg{}", n));
            assert_eq!(record.release, n as u32 + 1);
            let expected: Vec<String> = (0..7)
                .map(|m| format!("usr/share/pkg{}/file{}", n, m))
                .collect();
            assert_eq!(record.files, expected);
        }
    }

    #[test]
    fn test_version_with_hyphens_splits_at_last() {
        assert_eq!(
            split_version_release("a-tool-1.2.3-4"),
            ("a-tool-1.2.3".to_string(), 4)
        );

        let db = parse_str("tool\na-tool-1.2.3-4\nusr/bin/tool\n\n");
        assert_eq!(db.records()[0].version, "a-tool-1.2.3");
        assert_eq!(db.records()[0].release, 4);
    }

    #[test]
    fn test_release_parsing_like_atoi() {
        assert_eq!(split_version_release("1.0-abc"), ("1.0".to_string(), 0));
        assert_eq!(split_version_release("1.0-12rc"), ("1.0".to_string(), 12));
        assert_eq!(split_version_release("1.0-"), ("1.0".to_string(), 0));
        assert_eq!(split_version_release("1.0"), ("1.0".to_string(), 0));
    }

    #[test]
    fn test_trailing_record_without_blank_line_is_dropped() {
        // Current behavior: only a blank line commits a record
        let db = parse_str("foo\n1.0-1\nbin/foo\n\nbar\n2.0-1\nbin/bar\n");
        assert_eq!(db.len(), 1);
        assert_eq!(db.records()[0].name, "foo");
        assert!(db.find_by_name("bar").is_none());
    }

    #[test]
    fn test_record_without_files() {
        let db = parse_str("empty\n0.1-1\n\n");
        assert_eq!(db.len(), 1);
        assert!(db.records()[0].files.is_empty());
    }

    #[test]
    fn test_extra_blank_lines_between_records() {
        let db = parse_str("foo\n1.0-1\nbin/foo\n\n\n\nbar\n2.0-1\n\n");
        let names: Vec<&str> = db.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
    }

    #[test]
    fn test_blank_version_line_commits_empty_record() {
        let db = parse_str("broken\n\nfoo\n1.0-1\nbin/foo\n\n");
        assert_eq!(db.len(), 2);
        assert_eq!(db.records()[0].name, "broken");
        assert_eq!(db.records()[0].version, "");
        assert_eq!(db.records()[0].release, 0);
        assert_eq!(db.records()[1].name, "foo");
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let db = parse_str("foo\n1.0-1\n\nfoo\n2.0-1\n\n");
        assert_eq!(db.len(), 2);
        assert_eq!(db.find_by_name("foo").unwrap().version, "1.0");
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut content = b"foo\n1.0-1\nusr/share/".to_vec();
        content.push(0xff);
        content.extend_from_slice(b"\n\n");

        let db = parse(Cursor::new(content)).unwrap();
        assert_eq!(db.records()[0].files, vec!["usr/share/\u{fffd}"]);
    }
}

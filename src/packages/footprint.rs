// src/packages/footprint.rs

//! Footprint reports
//!
//! A footprint lists what installing an archive would put on disk, one line
//! per entry:
//!
//! ```text
//! -rwxr-xr-x	root/root	usr/bin/foo
//! lrwxrwxrwx	root/root	usr/bin/bar -> foo
//! crw--w----	root/tty	dev/tty0 (4, 0)
//! -rw-r--r--	root/root	etc/foo.conf (EMPTY)
//! ```

use super::archive::PackageArchive;
use super::entry::ArchiveEntry;
use super::indexer::{ArchiveFileInfo, FootprintIndexer};
use crate::error::Result;
use crate::filesystem::{FileType, IdentityResolver, format_mode};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Render a single footprint line, without the trailing newline
pub fn format_line(info: &ArchiveFileInfo, ids: &dyn IdentityResolver) -> String {
    let mut line = format!(
        "{}\t{}/{}\t{}",
        format_mode(info.mode),
        ids.user_display(info.uid),
        ids.group_display(info.gid),
        info.path
    );

    match FileType::from_mode(info.mode) {
        FileType::Symlink => {
            line.push_str(" -> ");
            line.push_str(info.link_target.as_deref().unwrap_or_default());
        }
        FileType::CharDevice | FileType::BlockDevice => {
            line.push_str(&format!(" ({}, {})", info.device_major, info.device_minor));
        }
        FileType::Regular if info.is_empty => line.push_str(" (EMPTY)"),
        _ => {}
    }

    line
}

/// Write the footprint of an entry stream, one line per entry
///
/// Each line is written as soon as its entry has been read, so a read
/// failure part way leaves the earlier lines in place.
pub fn write_footprint<W, I>(out: &mut W, entries: I, ids: &dyn IdentityResolver) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<ArchiveEntry>>,
{
    let mut indexer = FootprintIndexer::new();
    let mut count = 0;

    for entry in entries {
        let info = indexer.index(entry?);
        writeln!(out, "{}", format_line(&info, ids))?;
        count += 1;
    }

    Ok(count)
}

/// Write the footprint of the archive at `path`
pub fn footprint_archive<W: Write>(
    out: &mut W,
    path: &Path,
    ids: &dyn IdentityResolver,
) -> Result<usize> {
    let mut archive = PackageArchive::open(path)?;
    let count = write_footprint(out, archive.entries()?, ids)?;
    debug!("Wrote footprint of {} ({} entries)", path.display(), count);
    Ok(count)
}

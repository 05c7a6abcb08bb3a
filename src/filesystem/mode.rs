// src/filesystem/mode.rs

//! File mode bits and their `ls -l` rendering

/// Mask for the file type bits
pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

pub const S_ISUID: u32 = 0o4000;
pub const S_ISGID: u32 = 0o2000;
pub const S_ISVTX: u32 = 0o1000;

/// Type of a filesystem object, decoded from the high mode bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Socket,
    Fifo,
    Unknown,
}

impl FileType {
    /// Decode the type bits of a mode value
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFREG => FileType::Regular,
            S_IFDIR => FileType::Directory,
            S_IFLNK => FileType::Symlink,
            S_IFCHR => FileType::CharDevice,
            S_IFBLK => FileType::BlockDevice,
            S_IFSOCK => FileType::Socket,
            S_IFIFO => FileType::Fifo,
            _ => FileType::Unknown,
        }
    }

    /// Type bits for this file type (zero for `Unknown`)
    pub fn bits(&self) -> u32 {
        match self {
            FileType::Regular => S_IFREG,
            FileType::Directory => S_IFDIR,
            FileType::Symlink => S_IFLNK,
            FileType::CharDevice => S_IFCHR,
            FileType::BlockDevice => S_IFBLK,
            FileType::Socket => S_IFSOCK,
            FileType::Fifo => S_IFIFO,
            FileType::Unknown => 0,
        }
    }

    /// Leading character of an `ls -l` permission string
    pub fn glyph(&self) -> char {
        match self {
            FileType::Regular => '-',
            FileType::Directory => 'd',
            FileType::Symlink => 'l',
            FileType::CharDevice => 'c',
            FileType::BlockDevice => 'b',
            FileType::Socket => 's',
            FileType::Fifo => 'p',
            FileType::Unknown => '?',
        }
    }

    pub fn is_device(&self) -> bool {
        matches!(self, FileType::CharDevice | FileType::BlockDevice)
    }
}

/// Render a mode as a 10-character permission string, e.g. `-rwxr-xr-x`
///
/// The execute slot of each triplet also encodes the special bit paired
/// with it (setuid, setgid, sticky): lowercase when both bits are set,
/// uppercase when only the special bit is.
pub fn format_mode(mode: u32) -> String {
    let mut out = String::with_capacity(10);

    out.push(FileType::from_mode(mode).glyph());

    out.push(flag(mode, 0o400, 'r'));
    out.push(flag(mode, 0o200, 'w'));
    out.push(exec_slot(mode, 0o100, S_ISUID, 's'));

    out.push(flag(mode, 0o040, 'r'));
    out.push(flag(mode, 0o020, 'w'));
    out.push(exec_slot(mode, 0o010, S_ISGID, 's'));

    out.push(flag(mode, 0o004, 'r'));
    out.push(flag(mode, 0o002, 'w'));
    out.push(exec_slot(mode, 0o001, S_ISVTX, 't'));

    out
}

fn flag(mode: u32, bit: u32, set: char) -> char {
    if mode & bit != 0 { set } else { '-' }
}

fn exec_slot(mode: u32, exec: u32, special: u32, glyph: char) -> char {
    match (mode & exec != 0, mode & special != 0) {
        (true, false) => 'x',
        (false, true) => glyph.to_ascii_uppercase(),
        (true, true) => glyph,
        (false, false) => '-',
    }
}

// src/filesystem/mod.rs

//! Host filesystem conventions
//!
//! File-mode decoding and the uid/gid name lookups used when describing
//! what an archive would place on disk.

pub mod identity;
pub mod mode;

pub use identity::{IdentityResolver, StaticIdentity, SystemIdentity};
pub use mode::{FileType, format_mode};

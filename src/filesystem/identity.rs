// src/filesystem/identity.rs

//! Owner and group name resolution

use nix::unistd::{Gid, Group, Uid, User};
use std::collections::HashMap;
use tracing::debug;

/// Maps numeric owner ids to display names
///
/// A missing name is not an error; callers fall back to the numeric id.
pub trait IdentityResolver {
    /// Name of the user with the given uid, if known
    fn user_name(&self, uid: u64) -> Option<String>;

    /// Name of the group with the given gid, if known
    fn group_name(&self, gid: u64) -> Option<String>;

    /// User name, or the uid rendered as a number
    fn user_display(&self, uid: u64) -> String {
        self.user_name(uid).unwrap_or_else(|| uid.to_string())
    }

    /// Group name, or the gid rendered as a number
    fn group_display(&self, gid: u64) -> String {
        self.group_name(gid).unwrap_or_else(|| gid.to_string())
    }
}

/// Resolver backed by the host's passwd and group databases
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

impl IdentityResolver for SystemIdentity {
    fn user_name(&self, uid: u64) -> Option<String> {
        let uid = u32::try_from(uid).ok()?;
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(e) => {
                debug!("Failed to look up uid {}: {}", uid, e);
                None
            }
        }
    }

    fn group_name(&self, gid: u64) -> Option<String> {
        let gid = u32::try_from(gid).ok()?;
        match Group::from_gid(Gid::from_raw(gid)) {
            Ok(group) => group.map(|g| g.name),
            Err(e) => {
                debug!("Failed to look up gid {}: {}", gid, e);
                None
            }
        }
    }
}

/// Resolver with a fixed set of names, for chroots and tests
#[derive(Debug, Default, Clone)]
pub struct StaticIdentity {
    users: HashMap<u64, String>,
    groups: HashMap<u64, String>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user name
    pub fn with_user(mut self, uid: u64, name: &str) -> Self {
        self.users.insert(uid, name.to_string());
        self
    }

    /// Register a group name
    pub fn with_group(mut self, gid: u64, name: &str) -> Self {
        self.groups.insert(gid, name.to_string());
        self
    }
}

impl IdentityResolver for StaticIdentity {
    fn user_name(&self, uid: u64) -> Option<String> {
        self.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u64) -> Option<String> {
        self.groups.get(&gid).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity_lookup() {
        let ids = StaticIdentity::new().with_user(0, "root").with_group(0, "root");
        assert_eq!(ids.user_name(0), Some("root".to_string()));
        assert_eq!(ids.group_name(0), Some("root".to_string()));
        assert_eq!(ids.user_name(1000), None);
    }

    #[test]
    fn test_numeric_fallback() {
        let ids = StaticIdentity::new().with_user(0, "root");
        assert_eq!(ids.user_display(0), "root");
        assert_eq!(ids.user_display(4242), "4242");
        assert_eq!(ids.group_display(77), "77");
    }

    #[test]
    fn test_system_identity_out_of_range_id() {
        // ids that do not fit uid_t can never resolve
        let ids = SystemIdentity;
        assert_eq!(ids.user_name(u64::MAX), None);
        assert_eq!(ids.group_display(u64::MAX), u64::MAX.to_string());
    }
}

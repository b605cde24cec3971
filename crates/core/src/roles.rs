//! Account roles and the permission hierarchy.
//!
//! Role names must match the `user_profiles.role` check constraint in
//! `20260301000001_create_user_profiles.sql`.
//!
//! The hierarchy is a partial order: `parent` and `school` are peers that
//! cannot stand in for each other, both sit below `admin`, and `admin` sits
//! below `super_admin`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_PARENT: &str = "parent";
pub const ROLE_SCHOOL: &str = "school";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_PARENT, ROLE_SCHOOL, ROLE_ADMIN, ROLE_SUPER_ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Parent,
    School,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Parent => ROLE_PARENT,
            Role::School => ROLE_SCHOOL,
            Role::Admin => ROLE_ADMIN,
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }

    /// Level in the hierarchy. `parent` and `school` share the bottom level
    /// but are still incomparable; see the `PartialOrd` impl.
    fn level(self) -> u8 {
        match self {
            Role::Parent | Role::School => 1,
            Role::Admin => 2,
            Role::SuperAdmin => 3,
        }
    }

    /// Whether an actor holding `self` may perform an operation that
    /// requires `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.level().cmp(&other.level()) {
            // Two different roles on the same level (parent vs school).
            Ordering::Equal => None,
            ord => Some(ord),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_PARENT => Ok(Role::Parent),
            ROLE_SCHOOL => Ok(Role::School),
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SUPER_ADMIN => Ok(Role::SuperAdmin),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }
}

/// Resolve the effective role of an account.
///
/// A suspended account has no role regardless of what is stored, and an
/// unrecognised stored role resolves to no role rather than a default.
pub fn resolve_role(stored_role: &str, is_suspended: bool) -> Option<Role> {
    if is_suspended {
        return None;
    }
    stored_role.parse().ok()
}

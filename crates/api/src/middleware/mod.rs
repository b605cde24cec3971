//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token and the account record.
//! - [`rbac::RequireAdmin`] -- Requires `admin` or above.
//! - [`rbac::RequireSuperAdmin`] -- Requires `super_admin`.
//! - [`rbac::RequireSchool`] -- Requires `school` or above (not `parent`).
//! - [`rbac::RequireAuth`] -- Requires any resolved role.

pub mod auth;
pub mod rbac;

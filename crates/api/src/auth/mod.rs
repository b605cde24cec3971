//! Authentication primitives.
//!
//! - [`jwt`] -- bearer token validation against the identity provider's secret.

pub mod jwt;

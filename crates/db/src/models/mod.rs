//! Row types for the listing tables.
//!
//! Each row maps 1:1 to a `SELECT` column list in the matching repository
//! and converts into the `eduseek_core` domain type.

pub mod account;
pub mod metrics;
pub mod promotion;
pub mod school_profile;
pub mod tag;

//! EduSeek domain core.
//!
//! Pure domain logic with no I/O of its own: listing vocabularies, the
//! filter/sort rules, promotion selection, tag capping, the role hierarchy,
//! platform metrics, the record store traits, and the search engine that
//! drives them.

pub mod engine;
pub mod error;
pub mod listing;
pub mod metrics;
pub mod promotion;
pub mod roles;
pub mod search;
pub mod store;
pub mod tags;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

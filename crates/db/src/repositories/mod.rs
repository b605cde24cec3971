//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod listing_repo;
pub mod metrics_repo;
pub mod promotion_repo;
pub mod tag_repo;

pub use account_repo::AccountRepo;
pub use listing_repo::ListingRepo;
pub use metrics_repo::MetricsRepo;
pub use promotion_repo::PromotionRepo;
pub use tag_repo::TagRepo;

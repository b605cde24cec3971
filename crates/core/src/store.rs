//! The record store seam.
//!
//! The search engine and the HTTP layer only talk to persistence through
//! these traits. `eduseek_db::PgRecordStore` is the production
//! implementation; `testing::InMemoryStore` backs the test suites.

use async_trait::async_trait;

use crate::listing::Listing;
use crate::metrics::{PlatformMetrics, RoleBreakdown};
use crate::promotion::Promotion;
use crate::search::{ListingFilter, SortKey};
use crate::tags::{Tag, TagCategory};
use crate::types::{EntityId, Timestamp};

/// Failure reaching or querying the record store.
///
/// The engine never retries; retry policy, if any, belongs to the store
/// client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record store unreachable: {0}")]
    Connection(String),

    #[error("Record store timed out")]
    Timeout,

    #[error("Record store denied access: {0}")]
    PermissionDenied(String),

    #[error("Record store error: {0}")]
    Backend(String),
}

/// The subset of an account the access gate needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: EntityId,
    /// Role name as stored; resolved with [`crate::roles::resolve_role`].
    pub role: String,
    pub is_suspended: bool,
}

/// Read-side capabilities used by search and profile pages.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Published listings matching `filter`, ordered by `sort` with an id
    /// tiebreak, skipping `offset` rows and returning at most `limit`.
    async fn query_listings(
        &self,
        filter: &ListingFilter,
        sort: SortKey,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, StoreError>;

    /// The listing's effective promotion at `now`, if any.
    async fn get_effective_promotion(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Option<Promotion>, StoreError>;

    /// All tags of one category for a listing, in display order.
    async fn get_tags(
        &self,
        listing_id: EntityId,
        category: TagCategory,
    ) -> Result<Vec<Tag>, StoreError>;

    /// Bump the profile view counter by one.
    async fn increment_view_counter(&self, listing_id: EntityId) -> Result<(), StoreError>;

    /// A published listing by slug.
    async fn find_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError>;

    /// A listing by id in any publication state. Used by the owner's
    /// dashboard, where drafts and pending listings are visible.
    async fn find_listing_by_id(&self, listing_id: EntityId) -> Result<Option<Listing>, StoreError>;

    /// Every promotion of the listing that is active and not yet ended at
    /// `now`, latest start first (ties by id descending). The head of the
    /// list is the effective promotion.
    async fn list_active_promotions(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Vec<Promotion>, StoreError>;

    async fn find_account(&self, account_id: EntityId) -> Result<Option<Account>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Administrator capabilities: moderation writes and platform totals.
#[async_trait]
pub trait ModerationStore: Send + Sync {
    /// Listings awaiting approval, newest first.
    async fn list_pending_listings(&self, limit: i64) -> Result<Vec<Listing>, StoreError>;

    /// Approve or revoke approval of a listing. Returns `None` when the
    /// listing does not exist.
    async fn set_listing_approval(
        &self,
        listing_id: EntityId,
        approved: bool,
        reviewer: EntityId,
        now: Timestamp,
    ) -> Result<Option<Listing>, StoreError>;

    /// Platform totals at `now`.
    async fn platform_metrics(&self, now: Timestamp) -> Result<PlatformMetrics, StoreError>;

    /// Account counts per stored role.
    async fn users_by_role(&self) -> Result<RoleBreakdown, StoreError>;
}

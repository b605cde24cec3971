//! `RecordStore` / `ModerationStore` backed by PostgreSQL.

use async_trait::async_trait;
use eduseek_core::listing::Listing;
use eduseek_core::metrics::{PlatformMetrics, RoleBreakdown};
use eduseek_core::promotion::Promotion;
use eduseek_core::search::{ListingFilter, SortKey};
use eduseek_core::store::{Account, ModerationStore, RecordStore, StoreError};
use eduseek_core::tags::{Tag, TagCategory};
use eduseek_core::types::{EntityId, Timestamp};

use crate::repositories::{AccountRepo, ListingRepo, MetricsRepo, PromotionRepo, TagRepo};
use crate::DbPool;

/// SQLSTATE raised when `statement_timeout` cancels a query.
const QUERY_CANCELED: &str = "57014";
/// SQLSTATE for a missing privilege.
const INSUFFICIENT_PRIVILEGE: &str = "42501";
/// SQLSTATE class for connection exceptions.
const CONNECTION_EXCEPTION_CLASS: &str = "08";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Classify a sqlx error into the store's failure kinds.
pub fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        sqlx::Error::PoolClosed => StoreError::Connection("connection pool is closed".into()),
        sqlx::Error::Io(e) => StoreError::Connection(e.to_string()),
        sqlx::Error::Tls(e) => StoreError::Connection(e.to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(QUERY_CANCELED) => StoreError::Timeout,
            Some(INSUFFICIENT_PRIVILEGE) => StoreError::PermissionDenied(db_err.message().into()),
            Some(code) if code.starts_with(CONNECTION_EXCEPTION_CLASS) => {
                StoreError::Connection(db_err.message().into())
            }
            _ => StoreError::Backend(db_err.to_string()),
        },
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn query_listings(
        &self,
        filter: &ListingFilter,
        sort: SortKey,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, StoreError> {
        let rows = ListingRepo::search(&self.pool, filter, sort, offset, limit)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn get_effective_promotion(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Option<Promotion>, StoreError> {
        let row = PromotionRepo::find_effective(&self.pool, listing_id, now)
            .await
            .map_err(store_error)?;
        Ok(row.map(Promotion::from))
    }

    async fn get_tags(
        &self,
        listing_id: EntityId,
        category: TagCategory,
    ) -> Result<Vec<Tag>, StoreError> {
        let rows = match category {
            TagCategory::Sport => TagRepo::list_sports(&self.pool, listing_id).await,
            TagCategory::Subject => TagRepo::list_subjects(&self.pool, listing_id).await,
        }
        .map_err(store_error)?;
        Ok(rows.into_iter().map(|r| r.into_tag(category)).collect())
    }

    async fn increment_view_counter(&self, listing_id: EntityId) -> Result<(), StoreError> {
        let updated = ListingRepo::increment_view_count(&self.pool, listing_id)
            .await
            .map_err(store_error)?;
        if !updated {
            tracing::debug!(school_id = %listing_id, "View counter target no longer exists");
        }
        Ok(())
    }

    async fn find_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError> {
        let row = ListingRepo::find_published_by_slug(&self.pool, slug)
            .await
            .map_err(store_error)?;
        Ok(row.map(Listing::from))
    }

    async fn find_listing_by_id(&self, listing_id: EntityId) -> Result<Option<Listing>, StoreError> {
        let row = ListingRepo::find_by_id(&self.pool, listing_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Listing::from))
    }

    async fn list_active_promotions(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Vec<Promotion>, StoreError> {
        let rows = PromotionRepo::list_active(&self.pool, listing_id, now)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Promotion::from).collect())
    }

    async fn find_account(&self, account_id: EntityId) -> Result<Option<Account>, StoreError> {
        let row = AccountRepo::find_by_id(&self.pool, account_id)
            .await
            .map_err(store_error)?;
        Ok(row.map(Account::from))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}

#[async_trait]
impl ModerationStore for PgRecordStore {
    async fn list_pending_listings(&self, limit: i64) -> Result<Vec<Listing>, StoreError> {
        let rows = ListingRepo::list_pending(&self.pool, limit)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn set_listing_approval(
        &self,
        listing_id: EntityId,
        approved: bool,
        reviewer: EntityId,
        now: Timestamp,
    ) -> Result<Option<Listing>, StoreError> {
        let row = ListingRepo::set_approval(&self.pool, listing_id, approved, reviewer, now)
            .await
            .map_err(store_error)?;
        if row.is_some() {
            tracing::info!(school_id = %listing_id, approved, reviewer = %reviewer, "Listing approval updated");
        }
        Ok(row.map(Listing::from))
    }

    async fn platform_metrics(&self, now: Timestamp) -> Result<PlatformMetrics, StoreError> {
        let row = MetricsRepo::platform_totals(&self.pool, now)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    async fn users_by_role(&self) -> Result<RoleBreakdown, StoreError> {
        let rows = MetricsRepo::count_users_by_role(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(RoleBreakdown::from_counts(
            rows.into_iter().map(|r| (r.role, r.count)),
        ))
    }
}

//! In-memory record store and fixtures for tests.
//!
//! `InMemoryStore` applies the same predicate ([`ListingFilter::matches`])
//! and comparator ([`SortKey::compare`]) that the SQL store mirrors, and
//! can be told to fail specific lookups.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::listing::Listing;
use crate::metrics::{PlatformMetrics, RoleBreakdown};
use crate::promotion::{pick_effective, Promotion};
use crate::search::{ListingFilter, SortKey};
use crate::store::{Account, ModerationStore, RecordStore, StoreError};
use crate::tags::{Tag, TagCategory};
use crate::types::{EntityId, Timestamp};

/// Fixed clock used by fixtures: 2026-03-01 12:00:00 UTC.
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A published, unverified listing created one day before [`now`].
pub fn listing(slug: &str) -> Listing {
    let created = now() - Duration::days(1);
    Listing {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        school_name: format!("{slug} school"),
        description: None,
        address: "1 Main Road".to_string(),
        city: "Cape Town".to_string(),
        province: "Western Cape".to_string(),
        postal_code: None,
        school_type: Some("private".to_string()),
        grade_range: Some("primary".to_string()),
        fees_min: Some(20_000),
        fees_max: Some(40_000),
        fees_currency: "ZAR".to_string(),
        matric_pass_rate: None,
        student_count: None,
        established_year: None,
        cover_image_url: None,
        is_verified: false,
        is_approved: true,
        is_active: true,
        view_count: 0,
        created_at: created,
        updated_at: created,
        approved_at: Some(created),
        approved_by: None,
    }
}

/// A promotion for `school_id` that started `started_days_ago` days before
/// [`now`] and ends `ends_in_days` days after it (negative means ended).
pub fn promotion(
    school_id: EntityId,
    promotion_type: &str,
    started_days_ago: i64,
    ends_in_days: i64,
) -> Promotion {
    Promotion {
        id: Uuid::new_v4(),
        school_id,
        promotion_type: promotion_type.to_string(),
        start_date: now() - Duration::days(started_days_ago),
        end_date: now() + Duration::days(ends_in_days),
        is_active: true,
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    listings: Mutex<Vec<Listing>>,
    promotions: Vec<Promotion>,
    tags: Vec<Tag>,
    accounts: Vec<Account>,
    fail_queries: bool,
    fail_view_counter: bool,
    failing_tags: HashSet<EntityId>,
    failing_promotions: HashSet<EntityId>,
    listing_queries: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, listing: Listing) -> Self {
        self.lock_listings().push(listing);
        self
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotions.push(promotion);
        self
    }

    pub fn with_tags(mut self, school_id: EntityId, category: TagCategory, names: &[String]) -> Self {
        self.tags.extend(names.iter().map(|name| Tag {
            id: Uuid::new_v4(),
            school_id,
            name: name.clone(),
            category,
        }));
        self
    }

    pub fn with_account(mut self, id: EntityId, role: &str, is_suspended: bool) -> Self {
        self.accounts.push(Account {
            id,
            role: role.to_string(),
            is_suspended,
        });
        self
    }

    /// Every `query_listings` call fails with a connection error.
    pub fn fail_listing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Every `increment_view_counter` call fails.
    pub fn fail_view_counter(mut self) -> Self {
        self.fail_view_counter = true;
        self
    }

    pub fn fail_tags_for(mut self, school_id: EntityId) -> Self {
        self.failing_tags.insert(school_id);
        self
    }

    pub fn fail_promotion_for(mut self, school_id: EntityId) -> Self {
        self.failing_promotions.insert(school_id);
        self
    }

    /// Number of `query_listings` calls received so far.
    pub fn listing_query_count(&self) -> usize {
        self.listing_queries.load(Ordering::SeqCst)
    }

    pub fn view_count(&self, listing_id: EntityId) -> Option<i64> {
        self.lock_listings()
            .iter()
            .find(|l| l.id == listing_id)
            .map(|l| l.view_count)
    }

    pub fn listing(&self, listing_id: EntityId) -> Option<Listing> {
        self.lock_listings().iter().find(|l| l.id == listing_id).cloned()
    }

    fn lock_listings(&self) -> MutexGuard<'_, Vec<Listing>> {
        self.listings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn query_listings(
        &self,
        filter: &ListingFilter,
        sort: SortKey,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, StoreError> {
        self.listing_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries {
            return Err(StoreError::Connection("injected failure".into()));
        }

        let mut rows: Vec<Listing> = self
            .lock_listings()
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        rows.sort_by(|a, b| sort.compare(a, b));

        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_effective_promotion(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Option<Promotion>, StoreError> {
        if self.failing_promotions.contains(&listing_id) {
            return Err(StoreError::Timeout);
        }
        let rows = self.promotions.iter().filter(|p| p.school_id == listing_id);
        Ok(pick_effective(rows, now).cloned())
    }

    async fn get_tags(
        &self,
        listing_id: EntityId,
        category: TagCategory,
    ) -> Result<Vec<Tag>, StoreError> {
        if self.failing_tags.contains(&listing_id) {
            return Err(StoreError::Timeout);
        }
        Ok(self
            .tags
            .iter()
            .filter(|t| t.school_id == listing_id && t.category == category)
            .cloned()
            .collect())
    }

    async fn increment_view_counter(&self, listing_id: EntityId) -> Result<(), StoreError> {
        if self.fail_view_counter {
            return Err(StoreError::Backend("injected failure".into()));
        }
        if let Some(l) = self.lock_listings().iter_mut().find(|l| l.id == listing_id) {
            l.view_count += 1;
        }
        Ok(())
    }

    async fn find_listing_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError> {
        Ok(self
            .lock_listings()
            .iter()
            .find(|l| l.slug == slug && l.is_published())
            .cloned())
    }

    async fn find_listing_by_id(&self, listing_id: EntityId) -> Result<Option<Listing>, StoreError> {
        Ok(self.listing(listing_id))
    }

    async fn list_active_promotions(
        &self,
        listing_id: EntityId,
        now: Timestamp,
    ) -> Result<Vec<Promotion>, StoreError> {
        if self.failing_promotions.contains(&listing_id) {
            return Err(StoreError::Timeout);
        }
        let mut rows: Vec<Promotion> = self
            .promotions
            .iter()
            .filter(|p| p.school_id == listing_id && p.is_effective(now))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.start_date, b.id).cmp(&(a.start_date, a.id)));
        Ok(rows)
    }

    async fn find_account(&self, account_id: EntityId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.iter().find(|a| a.id == account_id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.fail_queries {
            return Err(StoreError::Connection("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationStore for InMemoryStore {
    async fn list_pending_listings(&self, limit: i64) -> Result<Vec<Listing>, StoreError> {
        let mut rows: Vec<Listing> = self
            .lock_listings()
            .iter()
            .filter(|l| !l.is_approved)
            .cloned()
            .collect();
        rows.sort_by(|a, b| SortKey::Relevance.compare(a, b));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn set_listing_approval(
        &self,
        listing_id: EntityId,
        approved: bool,
        reviewer: EntityId,
        now: Timestamp,
    ) -> Result<Option<Listing>, StoreError> {
        let mut listings = self.lock_listings();
        let Some(l) = listings.iter_mut().find(|l| l.id == listing_id) else {
            return Ok(None);
        };
        l.is_approved = approved;
        l.approved_at = approved.then_some(now);
        l.approved_by = approved.then_some(reviewer);
        l.updated_at = now;
        Ok(Some(l.clone()))
    }

    async fn platform_metrics(&self, now: Timestamp) -> Result<PlatformMetrics, StoreError> {
        if self.fail_queries {
            return Err(StoreError::Connection("injected failure".into()));
        }
        let listings = self.lock_listings();
        let approved = listings.iter().filter(|l| l.is_approved).count() as i64;
        Ok(PlatformMetrics {
            total_users: self.accounts.len() as i64,
            total_schools: listings.len() as i64,
            approved_schools: approved,
            pending_schools: listings.len() as i64 - approved,
            active_promotions: self.promotions.iter().filter(|p| p.is_effective(now)).count()
                as i64,
        })
    }

    async fn users_by_role(&self) -> Result<RoleBreakdown, StoreError> {
        Ok(RoleBreakdown::from_counts(
            self.accounts.iter().map(|a| (a.role.clone(), 1)),
        ))
    }
}

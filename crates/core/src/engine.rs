//! The listing query engine.
//!
//! `search` selects one page of listings, enriches each with its effective
//! promotion and capped tag lists, then moves promoted listings to the
//! front of the page. `load_profile` is the single-listing counterpart used
//! by the public profile page, and `load_owner_listing` serves a school
//! account's own dashboard.
//!
//! Enrichment lookups are read-only and independent per listing: a failed
//! lookup is logged and the listing is returned without that data.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::error::CoreError;
use crate::listing::Listing;
use crate::promotion::{pick_effective, Promotion};
use crate::search::{FilterSpec, ENRICHMENT_CONCURRENCY};
use crate::store::RecordStore;
use crate::tags::{Tag, TagCategory, TagList};
use crate::types::{EntityId, Timestamp};

/// A listing joined with its effective promotion and tags.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub promotion: Option<Promotion>,
    pub promotion_label: Option<&'static str>,
    pub sports: TagList,
    pub subjects: TagList,
}

impl EnrichedListing {
    pub fn is_promoted(&self) -> bool {
        self.promotion.is_some()
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage {
    pub listings: Vec<EnrichedListing>,
    pub has_more: bool,
    pub page: i64,
    pub limit: i64,
}

/// Run a listing search.
///
/// Fails with [`CoreError::Validation`] before touching the store when the
/// filter is malformed, and with [`CoreError::Store`] when the listing query
/// itself fails.
pub async fn search(
    store: &dyn RecordStore,
    spec: &FilterSpec,
    now: Timestamp,
) -> Result<ResultPage, CoreError> {
    spec.check()?;

    // One extra row tells us whether another page exists.
    let mut rows = store
        .query_listings(&spec.filter, spec.sort, spec.offset(), spec.limit + 1)
        .await?;

    let page_len = spec.limit as usize;
    let has_more = rows.len() > page_len;
    rows.truncate(page_len);

    let enriched: Vec<EnrichedListing> = stream::iter(rows)
        .map(|listing| enrich(store, listing, now))
        .buffered(ENRICHMENT_CONCURRENCY)
        .collect()
        .await;

    let listings = promoted_first(enriched);

    tracing::debug!(
        page = spec.page,
        limit = spec.limit,
        sort = %spec.sort,
        returned = listings.len(),
        promoted = listings.iter().filter(|l| l.is_promoted()).count(),
        has_more,
        "Listing search executed",
    );

    Ok(ResultPage {
        listings,
        has_more,
        page: spec.page,
        limit: spec.limit,
    })
}

/// Stable partition: promoted listings first, relative order kept within
/// each group.
pub fn promoted_first(listings: Vec<EnrichedListing>) -> Vec<EnrichedListing> {
    let (mut promoted, organic): (Vec<_>, Vec<_>) =
        listings.into_iter().partition(EnrichedListing::is_promoted);
    promoted.extend(organic);
    promoted
}

async fn enrich(store: &dyn RecordStore, listing: Listing, now: Timestamp) -> EnrichedListing {
    let id = listing.id;
    let (promotion, sports, subjects) = futures::join!(
        effective_promotion(store, id, now),
        tags(store, id, TagCategory::Sport),
        tags(store, id, TagCategory::Subject),
    );

    let promotion_label = promotion.as_ref().and_then(Promotion::label);

    EnrichedListing {
        listing,
        promotion,
        promotion_label,
        sports: TagList::capped(sports, TagCategory::Sport.display_limit()),
        subjects: TagList::capped(subjects, TagCategory::Subject.display_limit()),
    }
}

async fn effective_promotion(
    store: &dyn RecordStore,
    listing_id: EntityId,
    now: Timestamp,
) -> Option<Promotion> {
    match store.get_effective_promotion(listing_id, now).await {
        Ok(promotion) => promotion,
        Err(e) => {
            tracing::warn!(school_id = %listing_id, error = %e, "Promotion lookup failed, treating as unpromoted");
            None
        }
    }
}

async fn tags(
    store: &dyn RecordStore,
    listing_id: EntityId,
    category: TagCategory,
) -> Vec<Tag> {
    match store.get_tags(listing_id, category).await {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(school_id = %listing_id, ?category, error = %e, "Tag lookup failed, returning no tags");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Profile page
// ---------------------------------------------------------------------------

/// Everything the public profile page shows about one listing.
#[derive(Debug, Clone, Serialize)]
pub struct SchoolProfile {
    #[serde(flatten)]
    pub listing: Listing,
    pub promotion: Option<Promotion>,
    pub promotion_label: Option<&'static str>,
    pub sports: TagList,
    pub subjects: TagList,
}

/// Load a published listing by slug with its full tag lists.
pub async fn load_profile(
    store: &dyn RecordStore,
    slug: &str,
    now: Timestamp,
) -> Result<SchoolProfile, CoreError> {
    let listing = store
        .find_listing_by_slug(slug)
        .await?
        .filter(Listing::is_published)
        .ok_or_else(|| CoreError::NotFound {
            entity: "School",
            key: slug.to_string(),
        })?;

    let id = listing.id;
    let (promotion, sports, subjects) = futures::join!(
        effective_promotion(store, id, now),
        tags(store, id, TagCategory::Sport),
        tags(store, id, TagCategory::Subject),
    );

    Ok(SchoolProfile {
        promotion_label: promotion.as_ref().and_then(Promotion::label),
        listing,
        promotion,
        sports: TagList::full(sports),
        subjects: TagList::full(subjects),
    })
}

// ---------------------------------------------------------------------------
// Owner dashboard
// ---------------------------------------------------------------------------

/// A school account's own listing, in any publication state, with every
/// running promotion.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub promotion: Option<Promotion>,
    pub promotion_label: Option<&'static str>,
    pub active_promotions: Vec<Promotion>,
    pub sports: TagList,
    pub subjects: TagList,
}

/// Load the listing owned by `owner_id`. A school's listing id is its
/// account id.
///
/// Unlike search enrichment, a failed promotion lookup fails the call: the
/// promotion list is the point of the dashboard.
pub async fn load_owner_listing(
    store: &dyn RecordStore,
    owner_id: EntityId,
    now: Timestamp,
) -> Result<OwnerListing, CoreError> {
    let listing = store
        .find_listing_by_id(owner_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "School",
            key: owner_id.to_string(),
        })?;

    let (active_promotions, sports, subjects) = futures::join!(
        store.list_active_promotions(owner_id, now),
        tags(store, owner_id, TagCategory::Sport),
        tags(store, owner_id, TagCategory::Subject),
    );
    let active_promotions = active_promotions?;

    let promotion = pick_effective(&active_promotions, now).cloned();

    Ok(OwnerListing {
        promotion_label: promotion.as_ref().and_then(Promotion::label),
        listing,
        promotion,
        active_promotions,
        sports: TagList::full(sports),
        subjects: TagList::full(subjects),
    })
}

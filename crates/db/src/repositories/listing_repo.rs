//! Repository for the `school_profiles` table.
//!
//! The search query mirrors `ListingFilter::matches` and `SortKey::compare`
//! from `eduseek_core::search`; keep the two in step.

use eduseek_core::search::{contains_pattern, ListingFilter, SortKey};
use eduseek_core::types::{EntityId, Timestamp};
use sqlx::PgPool;

use crate::models::school_profile::SchoolProfileRow;

/// Column list shared across queries.
const COLUMNS: &str = "\
    id, slug, school_name, description, address, city, province, postal_code, \
    school_type, grade_range, fees_min, fees_max, fees_currency, matric_pass_rate, \
    student_count, established_year, cover_image_url, is_verified, is_approved, \
    is_active, view_count, created_at, updated_at, approved_at, approved_by";

/// Published-listing predicate plus one clause per optional filter.
///
/// Absent filters bind `NULL` (scalars), an empty array (sets) or `false`
/// (`verified_only`) and drop out. Fee bounds test range overlap against
/// `[COALESCE(fees_min, fees_max), COALESCE(fees_max, fees_min)]`; a row
/// with no fee data yields `NULL` and is excluded whenever a bound is set.
const SEARCH_WHERE: &str = "\
    WHERE is_approved AND is_active \
      AND ($1::TEXT IS NULL OR city ILIKE $1) \
      AND ($2::TEXT IS NULL OR province = $2) \
      AND (cardinality($3::TEXT[]) = 0 OR school_type = ANY($3)) \
      AND (cardinality($4::TEXT[]) = 0 OR grade_range = ANY($4)) \
      AND ($5::BIGINT IS NULL OR COALESCE(fees_max, fees_min) >= $5) \
      AND ($6::BIGINT IS NULL OR COALESCE(fees_min, fees_max) <= $6) \
      AND (NOT $7::BOOL OR is_verified)";

/// `ORDER BY` body for a sort key. Always ends with the id tiebreak.
pub fn order_by(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Relevance => "created_at DESC, id ASC",
        SortKey::Name => "school_name COLLATE \"C\" ASC, id ASC",
        SortKey::FeesAsc => "fees_min ASC NULLS LAST, id ASC",
        SortKey::FeesDesc => "fees_max DESC NULLS LAST, id ASC",
    }
}

/// Full search statement for a sort key. `$8` is the limit, `$9` the offset.
pub fn search_sql(sort: SortKey) -> String {
    format!(
        "SELECT {COLUMNS} FROM school_profiles {SEARCH_WHERE} \
         ORDER BY {} LIMIT $8 OFFSET $9",
        order_by(sort)
    )
}

/// Bind values for [`SEARCH_WHERE`], derived from a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBinds {
    pub city_pattern: Option<String>,
    pub province: Option<String>,
    pub school_types: Vec<String>,
    pub grade_ranges: Vec<String>,
    pub fees_min: Option<i64>,
    pub fees_max: Option<i64>,
    pub verified_only: bool,
}

impl From<&ListingFilter> for SearchBinds {
    fn from(filter: &ListingFilter) -> Self {
        Self {
            city_pattern: filter.city_term().map(contains_pattern),
            province: filter.province_term().map(str::to_string),
            school_types: filter
                .school_types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            grade_ranges: filter
                .grade_ranges
                .iter()
                .map(|g| g.as_str().to_string())
                .collect(),
            fees_min: filter.fees_min,
            fees_max: filter.fees_max,
            verified_only: filter.verified_only,
        }
    }
}

/// Provides listing queries and the moderation writes.
pub struct ListingRepo;

impl ListingRepo {
    /// One window of published listings matching `filter`.
    pub async fn search(
        pool: &PgPool,
        filter: &ListingFilter,
        sort: SortKey,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<SchoolProfileRow>, sqlx::Error> {
        let binds = SearchBinds::from(filter);
        let query = search_sql(sort);
        sqlx::query_as::<_, SchoolProfileRow>(&query)
            .bind(binds.city_pattern)
            .bind(binds.province)
            .bind(binds.school_types)
            .bind(binds.grade_ranges)
            .bind(binds.fees_min)
            .bind(binds.fees_max)
            .bind(binds.verified_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a published listing by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<SchoolProfileRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM school_profiles \
             WHERE slug = $1 AND is_approved AND is_active"
        );
        sqlx::query_as::<_, SchoolProfileRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a listing by id regardless of approval or active state.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<SchoolProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM school_profiles WHERE id = $1");
        sqlx::query_as::<_, SchoolProfileRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically bump `view_count`. Returns `true` if a row was updated.
    pub async fn increment_view_count(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE school_profiles SET view_count = view_count + 1 WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Listings awaiting approval, newest first.
    pub async fn list_pending(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<SchoolProfileRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM school_profiles \
             WHERE NOT is_approved \
             ORDER BY created_at DESC, id ASC \
             LIMIT $1"
        );
        sqlx::query_as::<_, SchoolProfileRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Set the approval flag. Approving stamps `approved_at`/`approved_by`;
    /// revoking clears them.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_approval(
        pool: &PgPool,
        id: EntityId,
        approved: bool,
        reviewer: EntityId,
        now: Timestamp,
    ) -> Result<Option<SchoolProfileRow>, sqlx::Error> {
        let query = format!(
            "UPDATE school_profiles SET \
                is_approved = $2, \
                approved_at = CASE WHEN $2 THEN $4 ELSE NULL END, \
                approved_by = CASE WHEN $2 THEN $3 ELSE NULL END, \
                updated_at = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchoolProfileRow>(&query)
            .bind(id)
            .bind(approved)
            .bind(reviewer)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}

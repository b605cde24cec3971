//! Listing search: filter specification, validation, and ordering rules.
//!
//! This module lives in `core` (no I/O) so the same predicate and
//! comparator back both the SQL store (which mirrors them in `WHERE` /
//! `ORDER BY` clauses) and the in-memory store used by tests.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::listing::{GradeRange, Listing, SchoolType};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of listings per page (one grid of 4 x 3 cards).
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum number of listings per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum number of enrichment lookups in flight for one page.
pub const ENRICHMENT_CONCURRENCY: usize = 12;

// ---------------------------------------------------------------------------
// Sort key
// ---------------------------------------------------------------------------

pub const SORT_RELEVANCE: &str = "relevance";
pub const SORT_NAME: &str = "name";
pub const SORT_FEES_ASC: &str = "fees_asc";
pub const SORT_FEES_DESC: &str = "fees_desc";

pub const VALID_SORT_KEYS: &[&str] = &[SORT_RELEVANCE, SORT_NAME, SORT_FEES_ASC, SORT_FEES_DESC];

/// Base ordering requested by the caller. Every key is followed by an
/// ascending id tiebreak so pagination is deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest listings first.
    #[default]
    Relevance,
    /// School name ascending, byte order.
    Name,
    /// Minimum fee ascending, listings without fees last.
    FeesAsc,
    /// Maximum fee descending, listings without fees last.
    FeesDesc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => SORT_RELEVANCE,
            SortKey::Name => SORT_NAME,
            SortKey::FeesAsc => SORT_FEES_ASC,
            SortKey::FeesDesc => SORT_FEES_DESC,
        }
    }

    /// Total order over listings for this key, id ascending on ties.
    pub fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        let primary = match self {
            SortKey::Relevance => b.created_at.cmp(&a.created_at),
            SortKey::Name => a.school_name.cmp(&b.school_name),
            SortKey::FeesAsc => nulls_last(a.fees_min, b.fees_min, |x, y| x.cmp(&y)),
            SortKey::FeesDesc => nulls_last(a.fees_max, b.fees_max, |x, y| y.cmp(&x)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

fn nulls_last<T: Copy>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SORT_RELEVANCE => Ok(SortKey::Relevance),
            SORT_NAME => Ok(SortKey::Name),
            SORT_FEES_ASC => Ok(SortKey::FeesAsc),
            SORT_FEES_DESC => Ok(SortKey::FeesDesc),
            other => Err(format!(
                "Invalid sort_by '{other}'. Must be one of: {}",
                VALID_SORT_KEYS.join(", ")
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Listing filter
// ---------------------------------------------------------------------------

/// Conjunction of optional predicates over published listings.
///
/// An absent predicate (`None`, empty set, blank string, `false`) places no
/// constraint; it never means "match empty".
#[derive(Debug, Clone, Default, PartialEq, Validate)]
#[validate(schema(function = "validate_fee_bounds"))]
pub struct ListingFilter {
    /// Case-insensitive substring of the city.
    pub city: Option<String>,
    /// Exact province name.
    pub province: Option<String>,
    pub school_types: Vec<SchoolType>,
    pub grade_ranges: Vec<GradeRange>,
    /// Keep listings whose upper fee is at least this.
    #[validate(range(min = 0, message = "fees_min must not be negative"))]
    pub fees_min: Option<i64>,
    /// Keep listings whose lower fee is at most this.
    #[validate(range(min = 0, message = "fees_max must not be negative"))]
    pub fees_max: Option<i64>,
    pub verified_only: bool,
}

fn validate_fee_bounds(filter: &ListingFilter) -> Result<(), ValidationError> {
    if let (Some(lo), Some(hi)) = (filter.fees_min, filter.fees_max) {
        if lo > hi {
            let mut err = ValidationError::new("fee_bounds");
            err.message = Some(Cow::from("fees_min must not exceed fees_max"));
            return Err(err);
        }
    }
    Ok(())
}

impl ListingFilter {
    /// Trimmed city term, `None` when blank.
    pub fn city_term(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    /// Trimmed province, `None` when blank.
    pub fn province_term(&self) -> Option<&str> {
        non_blank(self.province.as_deref())
    }

    pub fn has_fee_bounds(&self) -> bool {
        self.fees_min.is_some() || self.fees_max.is_some()
    }

    /// Whether `listing` is published and satisfies every present predicate.
    ///
    /// Fee bounds use inclusive range overlap against the listing's
    /// `[fees_min, fees_max]`; a listing without any fee data never matches
    /// a fee-bounded filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        if !listing.is_published() {
            return false;
        }

        if let Some(term) = self.city_term() {
            if !listing.city.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }

        if let Some(province) = self.province_term() {
            if listing.province != province {
                return false;
            }
        }

        if !self.school_types.is_empty() {
            let hit = listing
                .school_type
                .as_deref()
                .is_some_and(|t| self.school_types.iter().any(|s| s.as_str() == t));
            if !hit {
                return false;
            }
        }

        if !self.grade_ranges.is_empty() {
            let hit = listing
                .grade_range
                .as_deref()
                .is_some_and(|g| self.grade_ranges.iter().any(|r| r.as_str() == g));
            if !hit {
                return false;
            }
        }

        if self.has_fee_bounds() {
            let Some((lo, hi)) = listing.fee_range() else {
                return false;
            };
            if self.fees_min.is_some_and(|min| hi < min) {
                return false;
            }
            if self.fees_max.is_some_and(|max| lo > max) {
                return false;
            }
        }

        !self.verified_only || listing.is_verified
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// A validated-on-use search request: filter, ordering, and page window.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct FilterSpec {
    #[validate(nested)]
    pub filter: ListingFilter,
    pub sort: SortKey,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "limit must be between 1 and 100"))]
    pub limit: i64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            filter: ListingFilter::default(),
            sort: SortKey::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpec {
    /// Reject malformed specs before any store call.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }

    /// Row offset of the first listing on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// ---------------------------------------------------------------------------
// Caller-facing request shape
// ---------------------------------------------------------------------------

/// Raw search parameters as received from a query string.
///
/// `school_type` and `grade_range` are comma-separated lists. A blank
/// numeric or boolean field (`?fees_min=&page=`, as a plain HTML form
/// submits it) is treated as absent, the same as a blank string field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchRequest {
    pub city: Option<String>,
    pub province: Option<String>,
    pub school_type: Option<String>,
    pub grade_range: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub fees_min: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub fees_max: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub verified_only: Option<bool>,
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

/// Deserialize a query-string scalar, mapping a blank value to `None`.
///
/// Use with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match non_blank(raw.as_deref()) {
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

impl SearchRequest {
    /// Parse enum-valued fields and apply defaults.
    ///
    /// Numeric ranges are checked by [`FilterSpec::check`], which the search
    /// engine runs on every call.
    pub fn into_spec(self) -> Result<FilterSpec, CoreError> {
        let school_types = parse_csv::<SchoolType>(self.school_type.as_deref())?;
        let grade_ranges = parse_csv::<GradeRange>(self.grade_range.as_deref())?;

        let sort = match non_blank(self.sort_by.as_deref()) {
            Some(s) => s.parse::<SortKey>().map_err(CoreError::Validation)?,
            None => SortKey::default(),
        };

        Ok(FilterSpec {
            filter: ListingFilter {
                city: non_blank(self.city.as_deref()).map(str::to_string),
                province: non_blank(self.province.as_deref()).map(str::to_string),
                school_types,
                grade_ranges,
                fees_min: self.fees_min,
                fees_max: self.fees_max,
                verified_only: self.verified_only.unwrap_or(false),
            },
            sort,
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// Parse a comma-separated list, skipping blank entries and duplicates.
fn parse_csv<T>(raw: Option<&str>) -> Result<Vec<T>, CoreError>
where
    T: FromStr<Err = String> + PartialEq,
{
    let mut out = Vec::new();
    for part in raw.unwrap_or("").split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let value = part.parse::<T>().map_err(CoreError::Validation)?;
        if !out.contains(&value) {
            out.push(value);
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Query builder helpers
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// `\`, `%` and `_` are escaped with a backslash (PostgreSQL's default
/// `LIKE` escape character).
///
/// # Examples
///
/// ```
/// use eduseek_core::search::contains_pattern;
/// assert_eq!(contains_pattern("Cape"), "%Cape%");
/// assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
/// ```
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

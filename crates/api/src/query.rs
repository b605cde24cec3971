//! Query parameter types shared by handler modules.
//!
//! Search parameters are `eduseek_core::search::SearchRequest`; the types
//! here cover the remaining endpoints.

use eduseek_core::search::{empty_as_none, MAX_PAGE_SIZE};
use serde::Deserialize;
use validator::Validate;

/// Default number of listings in the moderation queue.
pub const DEFAULT_PENDING_LIMIT: i64 = 10;

/// `?limit=` for the moderation queue. A blank value means the default.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PendingParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl PendingParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PENDING_LIMIT)
    }
}

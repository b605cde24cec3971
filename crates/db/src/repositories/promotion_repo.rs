//! Repository for the `promotions` table.

use eduseek_core::types::{EntityId, Timestamp};
use sqlx::PgPool;

use crate::models::promotion::PromotionRow;

const COLUMNS: &str = "id, school_id, promotion_type, start_date, end_date, is_active";

/// Running promotions: active and not yet ended, latest start first, ties
/// broken by id descending. The first row is the effective promotion, which
/// mirrors `promotion::pick_effective`.
const RUNNING_SQL: &str = "\
    WHERE school_id = $1 AND is_active AND end_date >= $2 \
    ORDER BY start_date DESC, id DESC";

pub struct PromotionRepo;

impl PromotionRepo {
    /// The promotion in effect for `school_id` at `now`, if any.
    pub async fn find_effective(
        pool: &PgPool,
        school_id: EntityId,
        now: Timestamp,
    ) -> Result<Option<PromotionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions {RUNNING_SQL} LIMIT 1");
        sqlx::query_as::<_, PromotionRow>(&query)
            .bind(school_id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Every promotion running for `school_id` at `now`.
    pub async fn list_active(
        pool: &PgPool,
        school_id: EntityId,
        now: Timestamp,
    ) -> Result<Vec<PromotionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions {RUNNING_SQL}");
        sqlx::query_as::<_, PromotionRow>(&query)
            .bind(school_id)
            .bind(now)
            .fetch_all(pool)
            .await
    }
}

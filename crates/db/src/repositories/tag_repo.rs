//! Repository for `school_sports` and `school_activities`.

use eduseek_core::tags::SUBJECT_ACTIVITY_CATEGORY;
use eduseek_core::types::EntityId;
use sqlx::PgPool;

use crate::models::tag::TagRow;

pub struct TagRepo;

impl TagRepo {
    /// Sports for a school in insertion order.
    pub async fn list_sports(pool: &PgPool, school_id: EntityId) -> Result<Vec<TagRow>, sqlx::Error> {
        sqlx::query_as::<_, TagRow>(
            "SELECT id, school_id, sport_name AS name FROM school_sports \
             WHERE school_id = $1 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(school_id)
        .fetch_all(pool)
        .await
    }

    /// Academic activities (subjects) for a school in insertion order.
    pub async fn list_subjects(
        pool: &PgPool,
        school_id: EntityId,
    ) -> Result<Vec<TagRow>, sqlx::Error> {
        sqlx::query_as::<_, TagRow>(
            "SELECT id, school_id, activity_name AS name FROM school_activities \
             WHERE school_id = $1 AND category = $2 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(school_id)
        .bind(SUBJECT_ACTIVITY_CATEGORY)
        .fetch_all(pool)
        .await
    }
}

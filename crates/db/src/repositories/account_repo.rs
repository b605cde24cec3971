//! Read-only access to `user_profiles`.

use eduseek_core::types::EntityId;
use sqlx::PgPool;

use crate::models::account::AccountRow;

pub struct AccountRepo;

impl AccountRepo {
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<AccountRow>, sqlx::Error> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT id, role, is_suspended FROM user_profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

//! Aggregate counts across `user_profiles`, `school_profiles` and
//! `promotions`.

use eduseek_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::metrics::{PlatformTotalsRow, RoleCountRow};

/// `$1` is the current time, used for the running-promotion count.
const TOTALS_SQL: &str = "\
    SELECT \
        (SELECT COUNT(*) FROM user_profiles) AS total_users, \
        (SELECT COUNT(*) FROM school_profiles) AS total_schools, \
        (SELECT COUNT(*) FROM school_profiles WHERE is_approved) AS approved_schools, \
        (SELECT COUNT(*) FROM school_profiles WHERE NOT is_approved) AS pending_schools, \
        (SELECT COUNT(*) FROM promotions WHERE is_active AND end_date >= $1) AS active_promotions";

pub struct MetricsRepo;

impl MetricsRepo {
    pub async fn platform_totals(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<PlatformTotalsRow, sqlx::Error> {
        sqlx::query_as::<_, PlatformTotalsRow>(TOTALS_SQL)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Account counts per stored role, including suspended accounts.
    pub async fn count_users_by_role(pool: &PgPool) -> Result<Vec<RoleCountRow>, sqlx::Error> {
        sqlx::query_as::<_, RoleCountRow>(
            "SELECT role, COUNT(*) AS count FROM user_profiles GROUP BY role ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }
}

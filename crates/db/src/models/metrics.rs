use eduseek_core::metrics::PlatformMetrics;
use sqlx::FromRow;

/// Single-row result of the platform totals query.
#[derive(Debug, Clone, FromRow)]
pub struct PlatformTotalsRow {
    pub total_users: i64,
    pub total_schools: i64,
    pub approved_schools: i64,
    pub pending_schools: i64,
    pub active_promotions: i64,
}

impl From<PlatformTotalsRow> for PlatformMetrics {
    fn from(row: PlatformTotalsRow) -> Self {
        PlatformMetrics {
            total_users: row.total_users,
            total_schools: row.total_schools,
            approved_schools: row.approved_schools,
            pending_schools: row.pending_schools,
            active_promotions: row.active_promotions,
        }
    }
}

/// One `GROUP BY role` bucket from `user_profiles`.
#[derive(Debug, Clone, FromRow)]
pub struct RoleCountRow {
    pub role: String,
    pub count: i64,
}

use eduseek_core::promotion::Promotion;
use eduseek_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `promotions` table.
#[derive(Debug, Clone, FromRow)]
pub struct PromotionRow {
    pub id: EntityId,
    pub school_id: EntityId,
    pub promotion_type: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_active: bool,
}

impl From<PromotionRow> for Promotion {
    fn from(row: PromotionRow) -> Self {
        Promotion {
            id: row.id,
            school_id: row.school_id,
            promotion_type: row.promotion_type,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
        }
    }
}

use eduseek_core::store::Account;
use eduseek_core::types::EntityId;
use sqlx::FromRow;

/// The columns of `user_profiles` the access gate reads.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: EntityId,
    pub role: String,
    pub is_suspended: bool,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            role: row.role,
            is_suspended: row.is_suspended,
        }
    }
}

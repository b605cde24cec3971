//! Tag rows from `school_sports` and `school_activities`.
//!
//! Both tables are read into the same shape; the repository aliases the
//! name column to `name`.

use eduseek_core::tags::{Tag, TagCategory};
use eduseek_core::types::EntityId;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: EntityId,
    pub school_id: EntityId,
    pub name: String,
}

impl TagRow {
    pub fn into_tag(self, category: TagCategory) -> Tag {
        Tag {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            category,
        }
    }
}

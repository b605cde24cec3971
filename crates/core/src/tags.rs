//! Sport and subject tags attached to a listing.
//!
//! Search cards show at most [`MAX_DISPLAYED_SPORTS`] sports and
//! [`MAX_DISPLAYED_SUBJECTS`] subjects, with the overflow reported as a
//! count for the "+N more" chip.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Maximum number of sports shown on a search card.
pub const MAX_DISPLAYED_SPORTS: usize = 6;

/// Maximum number of subjects shown on a search card.
pub const MAX_DISPLAYED_SUBJECTS: usize = 6;

/// Activity category that marks a `school_activities` row as a subject.
pub const SUBJECT_ACTIVITY_CATEGORY: &str = "academic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Sport,
    Subject,
}

impl TagCategory {
    pub fn display_limit(self) -> usize {
        match self {
            TagCategory::Sport => MAX_DISPLAYED_SPORTS,
            TagCategory::Subject => MAX_DISPLAYED_SUBJECTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: EntityId,
    pub school_id: EntityId,
    pub name: String,
    pub category: TagCategory,
}

/// A capped list of tag names plus the number left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagList {
    pub displayed: Vec<String>,
    pub remaining: usize,
}

impl TagList {
    /// Keep the first `cap` tags in store order.
    pub fn capped(tags: Vec<Tag>, cap: usize) -> Self {
        let total = tags.len();
        let displayed: Vec<String> = tags.into_iter().take(cap).map(|t| t.name).collect();
        let remaining = total.saturating_sub(displayed.len());
        Self {
            displayed,
            remaining,
        }
    }

    /// Every tag, no cap. Used by the profile page.
    pub fn full(tags: Vec<Tag>) -> Self {
        Self {
            displayed: tags.into_iter().map(|t| t.name).collect(),
            remaining: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn sports(n: usize) -> Vec<Tag> {
        (0..n)
            .map(|i| Tag {
                id: Uuid::from_u128(i as u128),
                school_id: Uuid::nil(),
                name: format!("sport-{i}"),
                category: TagCategory::Sport,
            })
            .collect()
    }

    #[test]
    fn nine_sports_show_six_with_three_remaining() {
        let list = TagList::capped(sports(9), MAX_DISPLAYED_SPORTS);
        assert_eq!(list.displayed.len(), 6);
        assert_eq!(list.remaining, 3);
    }

    #[test]
    fn fewer_than_cap_shows_all() {
        let list = TagList::capped(sports(4), MAX_DISPLAYED_SPORTS);
        assert_eq!(list.displayed.len(), 4);
        assert_eq!(list.remaining, 0);
    }

    #[test]
    fn cap_keeps_store_order() {
        let list = TagList::capped(sports(8), 3);
        assert_eq!(list.displayed, vec!["sport-0", "sport-1", "sport-2"]);
    }

    #[test]
    fn capping_never_exceeds_limit_or_loses_count() {
        for total in 0..15 {
            let list = TagList::capped(sports(total), MAX_DISPLAYED_SUBJECTS);
            assert!(list.displayed.len() <= MAX_DISPLAYED_SUBJECTS);
            assert_eq!(list.remaining, total.saturating_sub(list.displayed.len()));
            assert_eq!(list.displayed.len() + list.remaining, total);
        }
    }

    #[test]
    fn full_list_has_no_remainder() {
        let list = TagList::full(sports(9));
        assert_eq!(list.displayed.len(), 9);
        assert_eq!(list.remaining, 0);
    }
}

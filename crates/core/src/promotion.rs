//! Paid promotions and the "effective promotion" rule.
//!
//! A promotion is effective while it is active and has not ended. When a
//! listing has several effective promotions, the one that started most
//! recently wins; equal start times fall back to the higher id so the
//! choice never depends on storage order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

pub const PROMOTION_FEATURED: &str = "featured";
pub const PROMOTION_BOOST: &str = "boost";
pub const PROMOTION_AD_PLACEMENT: &str = "ad_placement";

pub const VALID_PROMOTION_TYPES: &[&str] =
    &[PROMOTION_FEATURED, PROMOTION_BOOST, PROMOTION_AD_PLACEMENT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    Featured,
    Boost,
    AdPlacement,
}

impl PromotionType {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionType::Featured => PROMOTION_FEATURED,
            PromotionType::Boost => PROMOTION_BOOST,
            PromotionType::AdPlacement => PROMOTION_AD_PLACEMENT,
        }
    }

    /// Badge shown on search cards.
    pub fn label(self) -> &'static str {
        match self {
            PromotionType::Featured => "FEATURED",
            PromotionType::Boost => "PROMOTED",
            PromotionType::AdPlacement => "TOP PLACEMENT",
        }
    }
}

impl FromStr for PromotionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROMOTION_FEATURED => Ok(PromotionType::Featured),
            PROMOTION_BOOST => Ok(PromotionType::Boost),
            PROMOTION_AD_PLACEMENT => Ok(PromotionType::AdPlacement),
            other => Err(format!(
                "Invalid promotion_type '{other}'. Must be one of: {}",
                VALID_PROMOTION_TYPES.join(", ")
            )),
        }
    }
}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A promotion row. `promotion_type` is kept as stored so that a value
/// outside the known set still counts for ordering but carries no badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: EntityId,
    pub school_id: EntityId,
    pub promotion_type: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_active: bool,
}

impl Promotion {
    pub fn is_effective(&self, now: Timestamp) -> bool {
        self.is_active && self.end_date >= now
    }

    /// The promotion type, or `None` for a value outside the known set.
    pub fn kind(&self) -> Option<PromotionType> {
        self.promotion_type.parse().ok()
    }

    /// Badge text. Unknown types produce no badge.
    pub fn label(&self) -> Option<&'static str> {
        self.kind().map(PromotionType::label)
    }
}

/// Pick the effective promotion among a listing's promotion rows.
pub fn pick_effective<'a, I>(promotions: I, now: Timestamp) -> Option<&'a Promotion>
where
    I: IntoIterator<Item = &'a Promotion>,
{
    promotions
        .into_iter()
        .filter(|p| p.is_effective(now))
        .max_by_key(|p| (p.start_date, p.id))
}

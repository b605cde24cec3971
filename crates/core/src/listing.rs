//! School listings and the closed vocabularies used to filter them.
//!
//! The string constants must match the check constraints in
//! `20260301000002_create_school_profiles.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A published (or draft) school profile.
///
/// Only listings with `is_approved && is_active` are visible to search and
/// to the public profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: EntityId,
    pub slug: String,
    pub school_name: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: Option<String>,
    pub school_type: Option<String>,
    pub grade_range: Option<String>,
    pub fees_min: Option<i64>,
    pub fees_max: Option<i64>,
    pub fees_currency: String,
    pub matric_pass_rate: Option<f64>,
    pub student_count: Option<i32>,
    pub established_year: Option<i32>,
    pub cover_image_url: Option<String>,
    pub is_verified: bool,
    pub is_approved: bool,
    pub is_active: bool,
    pub view_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub approved_by: Option<EntityId>,
}

impl Listing {
    /// Whether the listing may appear in public search and profile pages.
    pub fn is_published(&self) -> bool {
        self.is_approved && self.is_active
    }

    /// The listing's fee range with a missing end filled from the other end.
    ///
    /// Returns `None` when the listing publishes no fee data at all.
    pub fn fee_range(&self) -> Option<(i64, i64)> {
        match (self.fees_min, self.fees_max) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            (Some(v), None) | (None, Some(v)) => Some((v, v)),
            (None, None) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// School type
// ---------------------------------------------------------------------------

pub const SCHOOL_TYPE_PUBLIC: &str = "public";
pub const SCHOOL_TYPE_PRIVATE: &str = "private";
pub const SCHOOL_TYPE_INDEPENDENT: &str = "independent";
pub const SCHOOL_TYPE_INTERNATIONAL: &str = "international";

pub const VALID_SCHOOL_TYPES: &[&str] = &[
    SCHOOL_TYPE_PUBLIC,
    SCHOOL_TYPE_PRIVATE,
    SCHOOL_TYPE_INDEPENDENT,
    SCHOOL_TYPE_INTERNATIONAL,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    Public,
    Private,
    Independent,
    International,
}

impl SchoolType {
    pub fn as_str(self) -> &'static str {
        match self {
            SchoolType::Public => SCHOOL_TYPE_PUBLIC,
            SchoolType::Private => SCHOOL_TYPE_PRIVATE,
            SchoolType::Independent => SCHOOL_TYPE_INDEPENDENT,
            SchoolType::International => SCHOOL_TYPE_INTERNATIONAL,
        }
    }
}

impl FromStr for SchoolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SCHOOL_TYPE_PUBLIC => Ok(SchoolType::Public),
            SCHOOL_TYPE_PRIVATE => Ok(SchoolType::Private),
            SCHOOL_TYPE_INDEPENDENT => Ok(SchoolType::Independent),
            SCHOOL_TYPE_INTERNATIONAL => Ok(SchoolType::International),
            other => Err(format!(
                "Invalid school_type '{other}'. Must be one of: {}",
                VALID_SCHOOL_TYPES.join(", ")
            )),
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grade range
// ---------------------------------------------------------------------------

pub const GRADE_CRECHE: &str = "creche";
pub const GRADE_PRIMARY: &str = "primary";
pub const GRADE_HIGH_SCHOOL: &str = "high_school";
pub const GRADE_VARSITY: &str = "varsity";

pub const VALID_GRADE_RANGES: &[&str] =
    &[GRADE_CRECHE, GRADE_PRIMARY, GRADE_HIGH_SCHOOL, GRADE_VARSITY];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeRange {
    Creche,
    Primary,
    HighSchool,
    Varsity,
}

impl GradeRange {
    pub fn as_str(self) -> &'static str {
        match self {
            GradeRange::Creche => GRADE_CRECHE,
            GradeRange::Primary => GRADE_PRIMARY,
            GradeRange::HighSchool => GRADE_HIGH_SCHOOL,
            GradeRange::Varsity => GRADE_VARSITY,
        }
    }
}

impl FromStr for GradeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GRADE_CRECHE => Ok(GradeRange::Creche),
            GRADE_PRIMARY => Ok(GradeRange::Primary),
            GRADE_HIGH_SCHOOL => Ok(GradeRange::HighSchool),
            GRADE_VARSITY => Ok(GradeRange::Varsity),
            other => Err(format!(
                "Invalid grade_range '{other}'. Must be one of: {}",
                VALID_GRADE_RANGES.join(", ")
            )),
        }
    }
}

impl fmt::Display for GradeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_type_parses_every_valid_value() {
        for name in VALID_SCHOOL_TYPES {
            let parsed: SchoolType = name.parse().unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn school_type_rejects_unknown_value() {
        let err = "charter".parse::<SchoolType>().unwrap_err();
        assert!(err.contains("Invalid school_type 'charter'"));
    }

    #[test]
    fn grade_range_is_case_sensitive() {
        assert!("Primary".parse::<GradeRange>().is_err());
        assert_eq!("primary".parse::<GradeRange>(), Ok(GradeRange::Primary));
    }

    #[test]
    fn grade_range_serializes_snake_case() {
        let json = serde_json::to_string(&GradeRange::HighSchool).unwrap();
        assert_eq!(json, "\"high_school\"");
    }
}

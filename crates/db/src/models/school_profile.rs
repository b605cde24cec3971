//! `school_profiles` row model.

use eduseek_core::listing::Listing;
use eduseek_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `school_profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct SchoolProfileRow {
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

impl From<SchoolProfileRow> for Listing {
    fn from(row: SchoolProfileRow) -> Self {
        Listing {
            id: row.id,
            slug: row.slug,
            school_name: row.school_name,
            description: row.description,
            address: row.address,
            city: row.city,
            province: row.province,
            postal_code: row.postal_code,
            school_type: row.school_type,
            grade_range: row.grade_range,
            fees_min: row.fees_min,
            fees_max: row.fees_max,
            fees_currency: row.fees_currency,
            matric_pass_rate: row.matric_pass_rate,
            student_count: row.student_count,
            established_year: row.established_year,
            cover_image_url: row.cover_image_url,
            is_verified: row.is_verified,
            is_approved: row.is_approved,
            is_active: row.is_active,
            view_count: row.view_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
            approved_at: row.approved_at,
            approved_by: row.approved_by,
        }
    }
}

//! Listing moderation and platform metrics handlers (admin or above).

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use eduseek_core::error::CoreError;
use eduseek_core::types::EntityId;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperAdmin};
use crate::query::PendingParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `PUT /admin/schools/{id}/approval`.
#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub approved: bool,
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/schools/pending
///
/// Listings awaiting approval, newest first.
pub async fn list_pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    query: Result<Query<PendingParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    params.validate().map_err(CoreError::from)?;

    let listings = state.moderation.list_pending_listings(params.limit()).await?;

    Ok(Json(DataResponse { data: listings }))
}

/// PUT /api/v1/admin/schools/{id}/approval
///
/// Approve or revoke approval of a listing.
pub async fn set_approval(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    path: Result<Path<EntityId>, PathRejection>,
    body: Result<Json<ApprovalRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let listing = state
        .moderation
        .set_listing_approval(id, body.approved, admin.user_id, state.now())
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "School",
            key: id.to_string(),
        })?;

    tracing::info!(
        school_id = %id,
        approved = body.approved,
        reviewer = %admin.user_id,
        "Listing moderated",
    );

    Ok(Json(DataResponse { data: listing }))
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/metrics
///
/// Platform totals: users, schools by approval state, running promotions.
pub async fn get_metrics(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let metrics = state.moderation.platform_metrics(state.now()).await?;
    Ok(Json(DataResponse { data: metrics }))
}

/// GET /api/v1/admin/metrics/users-by-role (super admin only)
pub async fn get_users_by_role(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let breakdown = state.moderation.users_by_role().await?;
    Ok(Json(DataResponse { data: breakdown }))
}

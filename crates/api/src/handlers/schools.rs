//! Public school search and profile handlers.
//!
//! Neither endpoint requires authentication.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use eduseek_core::engine;
use eduseek_core::search::SearchRequest;
use eduseek_core::store::RecordStore;
use eduseek_core::types::EntityId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// GET /api/v1/schools/search
///
/// Filtered, sorted, paginated listing search. Promoted listings lead each
/// page.
pub async fn search_schools(
    State(state): State<AppState>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(request) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let spec = request.into_spec()?;

    let page = engine::search(state.store.as_ref(), &spec, state.now()).await?;

    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/schools/{slug}
///
/// Public profile of an approved, active school. Counts the view in the
/// background; the response never waits on the counter.
pub async fn get_school_profile(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile = engine::load_profile(state.store.as_ref(), &slug, state.now()).await?;

    record_view(Arc::clone(&state.store), profile.listing.id);

    Ok(Json(DataResponse { data: profile }))
}

/// Fire-and-forget view counter bump. Failures are logged and dropped.
fn record_view(store: Arc<dyn RecordStore>, school_id: EntityId) {
    tokio::spawn(async move {
        if let Err(e) = store.increment_view_counter(school_id).await {
            tracing::debug!(school_id = %school_id, error = %e, "View counter update failed");
        }
    });
}

//! Route definitions for the public `/schools` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::schools;
use crate::state::AppState;

/// Routes mounted at `/schools`.
///
/// ```text
/// GET    /search                  -> search_schools
/// GET    /{slug}                  -> get_school_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(schools::search_schools))
        .route("/{slug}", get(schools::get_school_profile))
}

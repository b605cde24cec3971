//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require `admin` or above (enforced by handler extractors);
/// the role breakdown requires `super_admin`.
///
/// ```text
/// GET    /schools/pending         -> list_pending
/// PUT    /schools/{id}/approval   -> set_approval
/// GET    /metrics                 -> get_metrics
/// GET    /metrics/users-by-role   -> get_users_by_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schools/pending", get(admin::list_pending))
        .route("/schools/{id}/approval", put(admin::set_approval))
        .route("/metrics", get(admin::get_metrics))
        .route("/metrics/users-by-role", get(admin::get_users_by_role))
}

pub mod admin;
pub mod health;
pub mod schools;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /schools/search                         filtered listing search (public)
/// /schools/{slug}                         school profile (public)
///
/// /admin/schools/pending                  moderation queue (admin+)
/// /admin/schools/{id}/approval            approve / revoke (PUT, admin+)
/// /admin/metrics                          platform totals (admin+)
/// /admin/metrics/users-by-role            accounts per role (super_admin)
///
/// /me                                     caller id and role (auth required)
/// /me/school                              caller's own listing (school+)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/schools", schools::router())
        .nest("/admin", admin::router())
        .route("/me", get(handlers::me::get_me))
        .route("/me/school", get(handlers::me::get_my_school))
}

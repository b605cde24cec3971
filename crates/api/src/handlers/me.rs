use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use eduseek_core::engine;
use eduseek_core::roles::Role;
use eduseek_core::types::EntityId;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireSchool};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: EntityId,
    pub role: Role,
}

/// GET /api/v1/me
///
/// The caller's account id and resolved role.
pub async fn get_me(RequireAuth(user): RequireAuth) -> Json<DataResponse<MeResponse>> {
    Json(DataResponse {
        data: MeResponse {
            user_id: user.user_id,
            role: user.role,
        },
    })
}

/// GET /api/v1/me/school
///
/// The caller's own listing in any approval state, with its running
/// promotions. 404 when the account has not created a listing yet.
pub async fn get_my_school(
    RequireSchool(user): RequireSchool,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let owned = engine::load_owner_listing(state.store.as_ref(), user.user_id, state.now()).await?;
    Ok(Json(DataResponse { data: owned }))
}

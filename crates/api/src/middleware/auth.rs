//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eduseek_core::error::CoreError;
use eduseek_core::roles::{resolve_role, Role};
use eduseek_core::types::EntityId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller with a resolved role.
///
/// The token only proves identity; the role and suspension flag are read
/// from the account record on every request, so a suspension or role change
/// takes effect without waiting for the token to expire.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The account id (from `claims.sub`).
    pub user_id: EntityId,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let account = state.store.find_account(claims.sub).await?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Unknown account".into()))
        })?;

        let role = resolve_role(&account.role, account.is_suspended).ok_or_else(|| {
            let reason = if account.is_suspended {
                "Account is suspended"
            } else {
                "Account role is not recognised"
            };
            tracing::info!(user_id = %account.id, stored_role = %account.role, reason, "Access denied");
            AppError::Core(CoreError::Forbidden(reason.into()))
        })?;

        Ok(AuthUser {
            user_id: account.id,
            role,
        })
    }
}

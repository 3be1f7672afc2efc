//! Identity-boundary extractor.
//!
//! Token verification happens upstream (the identity proxy terminates the
//! Firebase session and injects the verified uid as an `x-user-id`
//! header). This service never sees credentials; it only requires that the
//! header is present and non-empty.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the verified user id, set by the identity proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user for a request.
///
/// Use as an extractor parameter in any handler that requires a user:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque id minted by the identity provider.
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {USER_ID_HEADER} header")))?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}

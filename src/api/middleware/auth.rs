//! Bearer token authentication and admin authorization middleware.

use axum::{
    Extension,
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::Actor;
use crate::{error::AppError, state::AppState};

/// Raw bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`Actor`] and the [`BearerToken`] are stored in
/// request extensions for handlers.
///
/// # Errors
///
/// - `401 Unauthorized` if the header is missing, or the token is unknown or revoked
/// - `403 Forbidden` if the member is suspended
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let actor = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(actor);
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

/// Rejects non-admin members. Must run after [`layer`].
pub async fn require_admin(
    Extension(actor): Extension<Actor>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !actor.is_admin() {
        return Err(AppError::forbidden(
            "Admin role required",
            json!({ "member_id": actor.member_id }),
        ));
    }

    Ok(next.run(req).await)
}

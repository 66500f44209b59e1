//! Handlers for registration, login and logout.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, MemberResponse, RegisterRequest, TokenResponse};
use crate::api::middleware::auth::BearerToken;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new member.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "kim@example.com", "password": "s3cret-pass", "nickname": "kim" }
/// ```
///
/// # Errors
///
/// - 400 on invalid email, password (8-64) or nickname (2-20)
/// - 409 if the email or nickname is taken
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), AppError> {
    payload.validate()?;

    let member = state.auth_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 for an unknown email or a wrong password (same message for both),
/// 403 for a suspended member.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .login(&payload.email.trim().to_lowercase(), &payload.password)
        .await?;

    Ok(Json(issued.into()))
}

/// Revokes the token used for this request.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

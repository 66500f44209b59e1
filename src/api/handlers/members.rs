//! Handlers for member profiles.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::member::PostSummaryResponse;
use crate::application::services::MemberDetail;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/members/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<MemberDetail>, AppError> {
    let detail = state
        .member_service
        .find_member_info(actor.member_id)
        .await?;
    Ok(Json(detail))
}

/// `GET /api/members/{id}`
pub async fn member_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MemberDetail>, AppError> {
    Ok(Json(state.member_service.find_member_info(id).await?))
}

/// Career posts written by the current member, newest first.
///
/// `GET /api/members/me/career-posts`
pub async fn my_career_posts_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<PostSummaryResponse>>, AppError> {
    let posts = state
        .member_service
        .my_career_posts(actor.member_id)
        .await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

//! Handlers for the career information board.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::career::{CareerPostResponse, CreateCareerPostRequest};
use crate::api::dto::member::PostSummaryResponse;
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/career/posts`
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateCareerPostRequest>,
) -> Result<(StatusCode, Json<CareerPostResponse>), AppError> {
    payload.validate()?;

    let post = state
        .career_service
        .create_post(actor, payload.title, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `GET /api/career/posts`
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CareerPostResponse>>, AppError> {
    let posts = state.career_service.list_posts().await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// `GET /api/career/posts/{id}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<CareerPostResponse>, AppError> {
    Ok(Json(state.career_service.get_post(post_id).await?.into()))
}

/// `GET /api/members/{id}/career-posts`
pub async fn member_posts_handler(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Result<Json<Vec<PostSummaryResponse>>, AppError> {
    let posts = state.career_service.list_member_posts(member_id).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// `DELETE /api/career/posts/{id}` (author or admin)
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.career_service.delete_post(actor, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for study recruitment posts, applications and comments.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::comment::{
    CommentResponse, CommentViewResponse, CreateCommentRequest, UpdateCommentRequest,
};
use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::study_recruit::{
    ApplicantResponse, DecisionRequest, RecruitDetailResponse, RecruitPostRequest,
    RecruitPostResponse, RecruitSummaryResponse,
};
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Opens a recruitment.
///
/// # Endpoint
///
/// `POST /api/study-recruit/posts`
///
/// # Errors
///
/// Returns 400 if capacity is outside 2-20, the study ends before it starts,
/// or the deadline falls after the start date.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<RecruitPostRequest>,
) -> Result<(StatusCode, Json<RecruitPostResponse>), AppError> {
    payload.validate()?;

    let post = state
        .study_recruit_service
        .create_post(actor, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `GET /api/study-recruit/posts?page=&page_size=`
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<RecruitSummaryResponse>>, AppError> {
    let (offset, limit) = params.offset_limit()?;

    let posts = state
        .study_recruit_service
        .list_posts(offset, limit)
        .await?;

    Ok(Json(Page {
        page: params.page(),
        page_size: params.page_size(),
        items: posts.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /api/study-recruit/posts/{id}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<RecruitDetailResponse>, AppError> {
    let detail = state.study_recruit_service.get_detail(post_id).await?;
    Ok(Json(detail.into()))
}

/// Edits a recruitment. Author only.
///
/// # Endpoint
///
/// `PUT /api/study-recruit/posts/{id}`
///
/// # Errors
///
/// Returns 400 if the actor is not the author or the post is missing or deleted.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    Json(payload): Json<RecruitPostRequest>,
) -> Result<Json<RecruitPostResponse>, AppError> {
    payload.validate()?;

    let post = state
        .study_recruit_service
        .update_post(actor, post_id, payload.into())
        .await?;
    Ok(Json(post.into()))
}

/// `DELETE /api/study-recruit/posts/{id}`
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .study_recruit_service
        .delete_post(actor, post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/study-recruit/posts/{id}/close`
pub async fn close_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .study_recruit_service
        .close_recruitment(actor, post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Applicants

/// `POST /api/study-recruit/posts/{id}/applicants`
pub async fn apply_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<(StatusCode, Json<ApplicantResponse>), AppError> {
    let applicant = state.study_recruit_service.apply(actor, post_id).await?;
    Ok((StatusCode::CREATED, Json(applicant.into())))
}

/// Withdraws the current member's pending application.
///
/// `DELETE /api/study-recruit/posts/{id}/applicants`
pub async fn cancel_application_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .study_recruit_service
        .cancel_application(actor, post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/study-recruit/posts/{id}/applicants` (author only)
pub async fn list_applicants_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<ApplicantResponse>>, AppError> {
    let applicants = state
        .study_recruit_service
        .list_applicants(actor, post_id)
        .await?;
    Ok(Json(applicants.into_iter().map(Into::into).collect()))
}

/// Approves or rejects a pending applicant.
///
/// # Endpoint
///
/// `PATCH /api/study-recruit/posts/{id}/applicants/{applicant_id}`
///
/// ```json
/// { "approve": true }
/// ```
pub async fn decide_applicant_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((post_id, applicant_id)): Path<(i64, i64)>,
    Json(payload): Json<DecisionRequest>,
) -> Result<Json<ApplicantResponse>, AppError> {
    let applicant = state
        .study_recruit_service
        .decide_applicant(actor, post_id, applicant_id, payload.approve)
        .await?;
    Ok(Json(applicant.into()))
}

// Comments

/// `GET /api/study-recruit/posts/{id}/comments`
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentViewResponse>>, AppError> {
    let comments = state.study_recruit_service.list_comments(post_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// `POST /api/study-recruit/posts/{id}/comments`
pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;

    let comment = state
        .study_recruit_service
        .create_comment(actor, post_id, payload.parent_id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// `PUT /api/study-recruit/comments/{id}`
pub async fn update_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    payload.validate()?;

    let comment = state
        .study_recruit_service
        .update_comment(actor, comment_id, payload.content)
        .await?;
    Ok(Json(comment.into()))
}

/// `DELETE /api/study-recruit/comments/{id}`
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .study_recruit_service
        .delete_comment(actor, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/admin/study-recruit/comments/{id}`
pub async fn admin_delete_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .study_recruit_service
        .admin_delete_comment(actor, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the coding problem board.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::algo::PostFormFields;
use crate::api::dto::coding::{
    CodingPostResponse, CodingPostSummaryResponse, CreateProblemRequest, CreatedResponse,
    ImageResponse, PostListQuery, ProblemResponse, UpdateCodingPostRequest,
};
use crate::api::dto::comment::{
    CommentResponse, CommentViewResponse, CreateCommentRequest, UpdateCommentRequest,
};
use crate::api::dto::like::LikeResponse;
use crate::api::handlers::multipart::PostForm;
use crate::application::services::CodingPostDraft;
use crate::domain::entities::{Actor, LikeTarget};
use crate::error::AppError;
use crate::state::AppState;

// Problems

/// `POST /api/admin/coding/problems`
pub async fn create_problem_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateProblemRequest>,
) -> Result<(StatusCode, Json<ProblemResponse>), AppError> {
    payload.validate()?;

    let problem = state.coding_service.create_problem(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(problem.into())))
}

/// `GET /api/coding/problems`
pub async fn list_problems_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProblemResponse>>, AppError> {
    let problems = state.coding_service.list_problems().await?;
    Ok(Json(problems.into_iter().map(Into::into).collect()))
}

/// `GET /api/coding/problems/{id}`
pub async fn get_problem_handler(
    State(state): State<AppState>,
    Path(problem_id): Path<i64>,
) -> Result<Json<ProblemResponse>, AppError> {
    Ok(Json(state.coding_service.get_problem(problem_id).await?.into()))
}

// Posts

/// Publishes a solution post from a multipart form.
///
/// # Endpoint
///
/// `POST /api/coding/posts`
///
/// # Form Fields
///
/// - `problem_id` - solved problem
/// - `title`, `content` - post text
/// - `images` - zero or more image files
///
/// When the feedback service is configured the post is reviewed before it is
/// stored; a failed review call returns 502 and nothing is persisted.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let mut form = PostForm::read(multipart).await?;

    let problem_id = form.id("problem_id")?;
    let fields = PostFormFields {
        title: form.take_text("title"),
        content: form.take_text("content"),
    };
    fields.validate()?;

    let id = state
        .coding_service
        .create_post(
            actor,
            CodingPostDraft {
                problem_id,
                title: fields.title,
                content: fields.content,
                images: form.images,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Attaches one uploaded image to an existing post.
///
/// `POST /api/coding/posts/{id}/images`
pub async fn add_image_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ImageResponse>), AppError> {
    let form = PostForm::read(multipart).await?;

    let mut images = form.images;
    if images.len() != 1 {
        return Err(AppError::bad_request(
            "Exactly one image file is required",
            json!({ "provided": images.len() }),
        ));
    }
    let image = images.remove(0);

    let (id, url) = state
        .coding_service
        .add_image(actor, post_id, image)
        .await?;

    Ok((StatusCode::CREATED, Json(ImageResponse { id, url })))
}

/// `GET /api/coding/posts?problem_id=`
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Vec<CodingPostSummaryResponse>>, AppError> {
    let posts = state.coding_service.list_posts(query.problem_id).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// `GET /api/coding/posts/{id}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<CodingPostResponse>, AppError> {
    Ok(Json(state.coding_service.get_post(post_id).await?.into()))
}

/// `PUT /api/coding/posts/{id}`
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdateCodingPostRequest>,
) -> Result<Json<CodingPostResponse>, AppError> {
    payload.validate()?;

    let post = state
        .coding_service
        .update_post(actor, post_id, payload.title, payload.content)
        .await?;
    Ok(Json(post.into()))
}

/// `DELETE /api/coding/posts/{id}`
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.coding_service.delete_post(actor, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/coding/posts/{id}/likes`
pub async fn like_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<(StatusCode, Json<LikeResponse>), AppError> {
    let like = state
        .like_service
        .like_post(actor, LikeTarget::CodingPost, post_id)
        .await?;
    Ok((StatusCode::CREATED, Json(like.into())))
}

// Comments

/// `GET /api/coding/posts/{id}/comments`
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentViewResponse>>, AppError> {
    let comments = state.coding_service.list_comments(post_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// `POST /api/coding/posts/{id}/comments`
pub async fn add_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;

    let comment = state
        .coding_service
        .add_comment(actor, post_id, payload.parent_id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// `PUT /api/coding/comments/{id}`
pub async fn update_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    payload.validate()?;

    let comment = state
        .coding_service
        .update_comment(actor, comment_id, payload.content)
        .await?;
    Ok(Json(comment.into()))
}

/// `DELETE /api/coding/comments/{id}`
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.coding_service.delete_comment(actor, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for the algorithm learning board.
//!
//! Member endpoints live under `/api/algo`, content management under
//! `/api/admin/algo`.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::algo::{
    AnswerRequest, AnswerResponse, CreateQuizRequest, PostFormFields, PostResponse,
    PostSummaryResponse, QuizResponse, RoadmapRequest, RoadmapResponse, UpdatePostRequest,
    UpdateQuizRequest,
};
use crate::api::dto::comment::{
    CommentResponse, CommentViewResponse, CreateCommentRequest, UpdateCommentRequest,
};
use crate::api::dto::like::LikeResponse;
use crate::api::handlers::multipart::PostForm;
use crate::domain::entities::{Actor, LikeTarget, NewAlgoQuiz};
use crate::error::AppError;
use crate::state::AppState;

// Member endpoints

/// `GET /api/algo/roadmaps`
pub async fn list_roadmaps_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoadmapResponse>>, AppError> {
    let roadmaps = state.algo_service.list_roadmaps().await?;
    Ok(Json(roadmaps.into_iter().map(Into::into).collect()))
}

/// `GET /api/algo/roadmaps/{id}/posts`
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Path(roadmap_id): Path<i64>,
) -> Result<Json<Vec<PostSummaryResponse>>, AppError> {
    let posts = state.algo_service.list_posts(roadmap_id).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// `GET /api/algo/posts/{id}`
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    Ok(Json(state.algo_service.get_post(post_id).await?.into()))
}

/// Quizzes of a post. Correct answers are not included.
///
/// `GET /api/algo/posts/{id}/quizzes`
pub async fn list_quizzes_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<QuizResponse>>, AppError> {
    let quizzes = state.algo_service.list_quizzes(post_id).await?;
    Ok(Json(quizzes.into_iter().map(Into::into).collect()))
}

/// `POST /api/algo/quizzes/{id}/answer`
pub async fn submit_answer_handler(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let correct = state
        .algo_service
        .submit_quiz_answer(quiz_id, payload.option_id)
        .await?;
    Ok(Json(AnswerResponse { correct }))
}

/// `POST /api/algo/posts/{id}/likes`
pub async fn like_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
) -> Result<(StatusCode, Json<LikeResponse>), AppError> {
    let like = state
        .like_service
        .like_post(actor, LikeTarget::AlgoPost, post_id)
        .await?;
    Ok((StatusCode::CREATED, Json(like.into())))
}

/// `GET /api/algo/posts/{id}/comments`
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentViewResponse>>, AppError> {
    let comments = state.algo_service.list_comments(post_id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// `POST /api/algo/posts/{id}/comments`
pub async fn add_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    payload.validate()?;

    let comment = state
        .algo_service
        .add_comment(actor, post_id, payload.parent_id, payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// `PUT /api/algo/comments/{id}`
pub async fn update_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    payload.validate()?;

    let comment = state
        .algo_service
        .update_comment(actor, comment_id, payload.content)
        .await?;
    Ok(Json(comment.into()))
}

/// `DELETE /api/algo/comments/{id}`
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.algo_service.delete_comment(actor, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Admin endpoints

/// `POST /api/admin/algo/roadmaps`
pub async fn create_roadmap_handler(
    State(state): State<AppState>,
    Json(payload): Json<RoadmapRequest>,
) -> Result<(StatusCode, Json<RoadmapResponse>), AppError> {
    payload.validate()?;

    let roadmap = state.algo_service.create_roadmap(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(roadmap.into())))
}

/// `PUT /api/admin/algo/roadmaps/{id}`
pub async fn update_roadmap_handler(
    State(state): State<AppState>,
    Path(roadmap_id): Path<i64>,
    Json(payload): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    payload.validate()?;

    let roadmap = state
        .algo_service
        .update_roadmap(roadmap_id, payload.into())
        .await?;
    Ok(Json(roadmap.into()))
}

/// Creates a post from a multipart form.
///
/// # Endpoint
///
/// `POST /api/admin/algo/posts`
///
/// # Form Fields
///
/// - `roadmap_id` - target roadmap
/// - `title`, `content` - post text
/// - `images` - zero or more image files, stored in order
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let mut form = PostForm::read(multipart).await?;

    let roadmap_id = form.id("roadmap_id")?;
    let fields = PostFormFields {
        title: form.take_text("title"),
        content: form.take_text("content"),
    };
    fields.validate()?;

    let post = state
        .algo_service
        .create_post(actor, roadmap_id, fields.title, fields.content, form.images)
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `PUT /api/admin/algo/posts/{id}`
pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let patch = payload.into_patch()?;

    let post = state.algo_service.update_post(post_id, patch).await?;
    Ok(Json(post.into()))
}

/// `DELETE /api/admin/algo/posts/{id}`
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.algo_service.delete_post(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/admin/algo/posts/{id}/quizzes`
pub async fn create_quiz_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizResponse>), AppError> {
    payload.validate()?;

    let (question, options) = payload.into_options();
    let quiz = state
        .algo_service
        .create_quiz(NewAlgoQuiz {
            post_id,
            question,
            options,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(quiz.into())))
}

/// `PUT /api/admin/algo/quizzes/{id}`
pub async fn update_quiz_handler(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    payload.validate()?;

    let quiz = state
        .algo_service
        .update_quiz(quiz_id, payload.into())
        .await?;
    Ok(Json(quiz.into()))
}

/// `DELETE /api/admin/algo/quizzes/{id}`
pub async fn delete_quiz_handler(
    State(state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.algo_service.delete_quiz(quiz_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/admin/algo/comments/{id}`
pub async fn admin_delete_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .algo_service
        .admin_delete_comment(actor, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers for study groups and their roadmaps.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::study::{
    AddMemberRequest, CreateRoadmapRequest, CreateStudyRequest, RoadmapDetailResponse,
    StudyResponse,
};
use crate::domain::entities::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/studies`
pub async fn create_study_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateStudyRequest>,
) -> Result<(StatusCode, Json<StudyResponse>), AppError> {
    payload.validate()?;

    let study = state.study_service.create_study(actor, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(study.into())))
}

/// `GET /api/studies/{id}`
pub async fn get_study_handler(
    State(state): State<AppState>,
    Path(study_id): Path<i64>,
) -> Result<Json<StudyResponse>, AppError> {
    Ok(Json(state.study_service.get_study(study_id).await?.into()))
}

/// `POST /api/studies/{id}/members` (leader only)
pub async fn add_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(study_id): Path<i64>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<StatusCode, AppError> {
    state
        .study_service
        .add_member(actor, study_id, payload.member_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Creates a roadmap with ordered milestones.
///
/// # Endpoint
///
/// `POST /api/studies/{id}/roadmaps` (leader only)
///
/// ```json
/// {
///   "title": "Spring term",
///   "description": "",
///   "milestones": [{ "title": "Knapsack", "description": "0/1 and unbounded" }]
/// }
/// ```
pub async fn create_roadmap_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(study_id): Path<i64>,
    Json(payload): Json<CreateRoadmapRequest>,
) -> Result<(StatusCode, Json<RoadmapDetailResponse>), AppError> {
    payload.validate()?;

    let detail = state
        .study_service
        .create_roadmap(actor, payload.into_new_roadmap(study_id))
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// `GET /api/studies/{id}/roadmaps/{roadmap_id}` (members only)
pub async fn get_roadmap_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((study_id, roadmap_id)): Path<(i64, i64)>,
) -> Result<Json<RoadmapDetailResponse>, AppError> {
    let detail = state
        .study_service
        .get_roadmap_detail(actor, study_id, roadmap_id)
        .await?;
    Ok(Json(detail.into()))
}

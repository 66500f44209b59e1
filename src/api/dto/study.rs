//! DTOs for study groups and their roadmaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::StudyOverview;
use crate::domain::entities::{
    MilestoneInfo, NewMilestone, NewStudy, NewStudyRoadmap, Study, StudyRoadmapDetail,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl From<CreateStudyRequest> for NewStudy {
    fn from(r: CreateStudyRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudyResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Members besides the leader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Study> for StudyResponse {
    fn from(s: Study) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            member_count: None,
            created_at: s.created_at,
        }
    }
}

impl From<StudyOverview> for StudyResponse {
    fn from(o: StudyOverview) -> Self {
        Self {
            member_count: Some(o.member_count),
            ..o.study.into()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub member_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MilestoneRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoadmapRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(nested)]
    pub milestones: Vec<MilestoneRequest>,
}

impl CreateRoadmapRequest {
    pub fn into_new_roadmap(self, study_id: i64) -> NewStudyRoadmap {
        NewStudyRoadmap {
            study_id,
            title: self.title,
            description: self.description,
            milestones: self
                .milestones
                .into_iter()
                .map(|m| NewMilestone {
                    title: m.title,
                    description: m.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MilestoneResponse {
    pub milestone_id: i64,
    pub milestone_title: String,
    pub milestone_description: String,
}

impl From<MilestoneInfo> for MilestoneResponse {
    fn from(m: MilestoneInfo) -> Self {
        Self {
            milestone_id: m.milestone_id,
            milestone_title: m.milestone_title,
            milestone_description: m.milestone_description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoadmapDetailResponse {
    pub roadmap_id: i64,
    pub study_id: i64,
    pub roadmap_title: String,
    pub roadmap_description: String,
    pub milestones: Vec<MilestoneResponse>,
}

impl From<StudyRoadmapDetail> for RoadmapDetailResponse {
    fn from(d: StudyRoadmapDetail) -> Self {
        Self {
            roadmap_id: d.roadmap_id,
            study_id: d.study_id,
            roadmap_title: d.roadmap_title,
            roadmap_description: d.roadmap_description,
            milestones: d.milestones.into_iter().map(Into::into).collect(),
        }
    }
}

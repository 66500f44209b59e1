//! Study groups, their members and roadmaps.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyRole {
    Leader,
    Member,
}

impl StudyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyRole::Leader => "LEADER",
            StudyRole::Member => "MEMBER",
        }
    }
}

impl FromStr for StudyRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEADER" => Ok(StudyRole::Leader),
            "MEMBER" => Ok(StudyRole::Member),
            other => Err(AppError::internal(
                "Unknown study role",
                json!({ "role": other }),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Study {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStudy {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneInfo {
    pub milestone_id: i64,
    pub milestone_title: String,
    pub milestone_description: String,
}

/// A study roadmap with its milestones in display order.
#[derive(Debug, Clone)]
pub struct StudyRoadmapDetail {
    pub roadmap_id: i64,
    pub study_id: i64,
    pub roadmap_title: String,
    pub roadmap_description: String,
    pub milestones: Vec<MilestoneInfo>,
}

#[derive(Debug, Clone)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewStudyRoadmap {
    pub study_id: i64,
    pub title: String,
    pub description: String,
    pub milestones: Vec<NewMilestone>,
}

//! Study recruitment posts and their applicants.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

pub const MIN_CAPACITY: i32 = 2;
pub const MAX_CAPACITY: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitStatus {
    Open,
    Closed,
}

impl RecruitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecruitStatus::Open => "OPEN",
            RecruitStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for RecruitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecruitStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(RecruitStatus::Open),
            "CLOSED" => Ok(RecruitStatus::Closed),
            other => Err(AppError::internal(
                "Unknown recruitment status",
                json!({ "status": other }),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "PENDING",
            ApplicantStatus::Approved => "APPROVED",
            ApplicantStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicantStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicantStatus::Pending),
            "APPROVED" => Ok(ApplicantStatus::Approved),
            "REJECTED" => Ok(ApplicantStatus::Rejected),
            other => Err(AppError::internal(
                "Unknown applicant status",
                json!({ "status": other }),
            )),
        }
    }
}

/// A recruitment post for a study group.
#[derive(Debug, Clone)]
pub struct StudyRecruitPost {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub capacity: i32,
    pub status: RecruitStatus,
    pub comment_count: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudyRecruitPost {
    /// Open, visible and not past its deadline.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.visible && self.status == RecruitStatus::Open && now < self.expires_at
    }
}

/// Fields supplied when creating or editing a recruitment post.
#[derive(Debug, Clone)]
pub struct StudyRecruitPostInput {
    pub title: String,
    pub content: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub capacity: i32,
}

impl StudyRecruitPostInput {
    /// Checks the schedule and capacity constraints.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if capacity is out of range, the study
    /// ends before it starts, or recruitment closes after the study starts.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(AppError::bad_request(
                "Invalid study capacity",
                json!({ "min": MIN_CAPACITY, "max": MAX_CAPACITY, "provided": self.capacity }),
            ));
        }

        if self.end_date < self.start_date {
            return Err(AppError::bad_request(
                "Study end date must not be before its start date",
                json!({ "start_date": self.start_date, "end_date": self.end_date }),
            ));
        }

        if self.expires_at.date_naive() >= self.start_date {
            return Err(AppError::bad_request(
                "Recruitment must close before the study starts",
                json!({ "expires_at": self.expires_at, "start_date": self.start_date }),
            ));
        }

        Ok(())
    }
}

/// Query projection for the post detail page.
#[derive(Debug, Clone)]
pub struct StudyRecruitDetail {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub member_nickname: String,
    pub rank_name: String,
    pub status: RecruitStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub capacity: i32,
    pub participant_count: i64,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for recruitment posts.
#[derive(Debug, Clone)]
pub struct StudyRecruitSummary {
    pub id: i64,
    pub title: String,
    pub member_nickname: String,
    pub status: RecruitStatus,
    pub capacity: i32,
    pub participant_count: i64,
    pub comment_count: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StudyRecruitApplicant {
    pub id: i64,
    pub post_id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub status: ApplicantStatus,
    pub created_at: DateTime<Utc>,
}

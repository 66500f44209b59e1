//! DTOs for study recruitment posts and applicants.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{
    StudyRecruitApplicant, StudyRecruitDetail, StudyRecruitPost, StudyRecruitPostInput,
    StudyRecruitSummary,
};

/// Body for creating or editing a recruitment post.
///
/// Schedule rules that span fields (end after start, deadline before start)
/// are checked by the service.
#[derive(Debug, Deserialize, Validate)]
pub struct RecruitPostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,

    #[validate(range(min = 2, max = 20))]
    pub capacity: i32,
}

impl From<RecruitPostRequest> for StudyRecruitPostInput {
    fn from(r: RecruitPostRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
            start_date: r.start_date,
            end_date: r.end_date,
            expires_at: r.expires_at,
            capacity: r.capacity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecruitPostResponse {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub capacity: i32,
    pub status: &'static str,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudyRecruitPost> for RecruitPostResponse {
    fn from(p: StudyRecruitPost) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            title: p.title,
            content: p.content,
            start_date: p.start_date,
            end_date: p.end_date,
            expires_at: p.expires_at,
            capacity: p.capacity,
            status: p.status.as_str(),
            comment_count: p.comment_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecruitDetailResponse {
    pub id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub member_nickname: String,
    pub rank_name: String,
    pub status: &'static str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
    pub capacity: i32,
    pub participant_count: i64,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudyRecruitDetail> for RecruitDetailResponse {
    fn from(d: StudyRecruitDetail) -> Self {
        Self {
            id: d.id,
            member_id: d.member_id,
            title: d.title,
            content: d.content,
            member_nickname: d.member_nickname,
            rank_name: d.rank_name,
            status: d.status.as_str(),
            start_date: d.start_date,
            end_date: d.end_date,
            expires_at: d.expires_at,
            capacity: d.capacity,
            participant_count: d.participant_count,
            comment_count: d.comment_count,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecruitSummaryResponse {
    pub id: i64,
    pub title: String,
    pub member_nickname: String,
    pub status: &'static str,
    pub capacity: i32,
    pub participant_count: i64,
    pub comment_count: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<StudyRecruitSummary> for RecruitSummaryResponse {
    fn from(s: StudyRecruitSummary) -> Self {
        Self {
            id: s.id,
            title: s.title,
            member_nickname: s.member_nickname,
            status: s.status.as_str(),
            capacity: s.capacity,
            participant_count: s.participant_count,
            comment_count: s.comment_count,
            expires_at: s.expires_at,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicantResponse {
    pub id: i64,
    pub post_id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<StudyRecruitApplicant> for ApplicantResponse {
    fn from(a: StudyRecruitApplicant) -> Self {
        Self {
            id: a.id,
            post_id: a.post_id,
            member_id: a.member_id,
            member_nickname: a.member_nickname,
            status: a.status.as_str(),
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub approve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_dates() {
        let json = r#"{
            "title": "Graph study",
            "content": "BFS and DFS every Tuesday",
            "start_date": "2026-03-02",
            "end_date": "2026-04-30",
            "expires_at": "2026-02-28T23:59:00Z",
            "capacity": 6
        }"#;

        let request: RecruitPostRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_ok());
        let input: StudyRecruitPostInput = request.into();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_capacity_out_of_range() {
        let json = r#"{
            "title": "Graph study",
            "content": "c",
            "start_date": "2026-03-02",
            "end_date": "2026-04-30",
            "expires_at": "2026-02-28T23:59:00Z",
            "capacity": 1
        }"#;

        let request: RecruitPostRequest = serde_json::from_str(json).unwrap();

        assert!(request.validate().is_err());
    }
}

//! DTOs for the coding problem board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{
    AiFeedback, CodingPost, CodingPostSummary, CodingProblem, NewCodingProblem,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(length(min = 1, max = 50))]
    pub platform: String,

    #[validate(length(min = 1, max = 20))]
    pub difficulty: String,
}

impl From<CreateProblemRequest> for NewCodingProblem {
    fn from(r: CreateProblemRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
            platform: r.platform,
            difficulty: r.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub difficulty: String,
    pub post_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CodingProblem> for ProblemResponse {
    fn from(p: CodingProblem) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            platform: p.platform,
            difficulty: p.difficulty,
            post_count: p.post_count,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub problem_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCodingPostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub ai_big_o: Option<String>,
    pub ai_good: Option<String>,
    pub ai_bad: Option<String>,
    pub ai_plan: Option<String>,
}

impl From<AiFeedback> for FeedbackResponse {
    fn from(f: AiFeedback) -> Self {
        Self {
            ai_big_o: f.big_o,
            ai_good: f.good,
            ai_bad: f.bad,
            ai_plan: f.plan,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CodingPostResponse {
    pub id: i64,
    pub member_id: i64,
    pub problem_id: i64,
    pub title: String,
    pub content: String,
    #[serde(flatten)]
    pub feedback: FeedbackResponse,
    pub comment_count: i32,
    pub like_count: i32,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CodingPost> for CodingPostResponse {
    fn from(p: CodingPost) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            problem_id: p.problem_id,
            title: p.title,
            content: p.content,
            feedback: p.feedback.into(),
            comment_count: p.comment_count,
            like_count: p.like_count,
            images: p.images,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CodingPostSummaryResponse {
    pub id: i64,
    pub problem_id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub title: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CodingPostSummary> for CodingPostSummaryResponse {
    fn from(p: CodingPostSummary) -> Self {
        Self {
            id: p.id,
            problem_id: p.problem_id,
            member_id: p.member_id,
            member_nickname: p.member_nickname,
            title: p.title,
            comment_count: p.comment_count,
            like_count: p.like_count,
            created_at: p.created_at,
        }
    }
}

/// Id of a newly created resource.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i64,
    pub url: String,
}

//! Coding problem boards: problems, solution posts and AI feedback.

use chrono::{DateTime, Utc};

/// A problem from an external judge that members post solutions for.
#[derive(Debug, Clone)]
pub struct CodingProblem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub platform: String,
    pub difficulty: String,
    pub post_count: i32,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCodingProblem {
    pub title: String,
    pub content: String,
    pub platform: String,
    pub difficulty: String,
}

/// Review produced by the external feedback service for a solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiFeedback {
    pub big_o: Option<String>,
    pub good: Option<String>,
    pub bad: Option<String>,
    pub plan: Option<String>,
}

/// A member's solution post for a coding problem.
#[derive(Debug, Clone)]
pub struct CodingPost {
    pub id: i64,
    pub member_id: i64,
    pub problem_id: i64,
    pub title: String,
    pub content: String,
    pub feedback: AiFeedback,
    pub comment_count: i32,
    pub like_count: i32,
    pub visible: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for solution posts.
#[derive(Debug, Clone)]
pub struct CodingPostSummary {
    pub id: i64,
    pub problem_id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub title: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a solution post. Images are already uploaded.
#[derive(Debug, Clone)]
pub struct NewCodingPost {
    pub member_id: i64,
    pub problem_id: i64,
    pub title: String,
    pub content: String,
    pub feedback: Option<AiFeedback>,
    pub image_urls: Vec<String>,
}

/// Request sent to the feedback service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub title: String,
    pub content: String,
    pub problem: String,
}

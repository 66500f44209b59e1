//! DTOs for the career information board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::CareerPost;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCareerPostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CareerPostResponse {
    pub id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CareerPost> for CareerPostResponse {
    fn from(p: CareerPost) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            member_nickname: p.member_nickname,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

//! Career information posts.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CareerPost {
    pub id: i64,
    pub member_id: i64,
    pub member_nickname: String,
    pub title: String,
    pub content: String,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCareerPost {
    pub member_id: i64,
    pub title: String,
    pub content: String,
}

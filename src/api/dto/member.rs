//! DTOs for member profile endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::PostSummary;

#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(p: PostSummary) -> Self {
        Self {
            id: p.id,
            title: p.title,
            created_at: p.created_at,
        }
    }
}

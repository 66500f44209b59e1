//! DTO for the like endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Like;

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: i64,
    pub post_id: i64,
    pub target: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeResponse {
    fn from(l: Like) -> Self {
        Self {
            id: l.id,
            post_id: l.post_id,
            target: l.target.as_str(),
            created_at: l.created_at,
        }
    }
}

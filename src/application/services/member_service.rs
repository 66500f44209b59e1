//! Member profile lookups.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Member, PostSummary};
use crate::domain::repositories::MemberRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, member_profile_key};

/// Public projection of a member, cached as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetail {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub point: i32,
    pub rank_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberDetail {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            email: m.email,
            nickname: m.nickname,
            point: m.point,
            rank_name: m.rank_name,
            created_at: m.created_at,
        }
    }
}

/// Service for member profiles.
///
/// Profiles are read through the cache; point changes invalidate them
/// (see [`crate::application::services::LikeService`]).
pub struct MemberService<R: MemberRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Returns a member's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    pub async fn find_member_info(&self, id: i64) -> Result<MemberDetail, AppError> {
        let key = member_profile_key(id);

        if let Ok(Some(cached)) = self.cache.get(&key).await {
            match serde_json::from_str::<MemberDetail>(&cached) {
                Ok(detail) => return Ok(detail),
                Err(e) => debug!(member_id = id, "Discarding unreadable cached profile: {}", e),
            }
        }

        let detail: MemberDetail = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found", json!({ "member_id": id })))?
            .into();

        if let Ok(serialized) = serde_json::to_string(&detail) {
            let _ = self.cache.set(&key, &serialized, None).await;
        }

        Ok(detail)
    }

    /// Lists the member's visible career posts, newest first.
    pub async fn my_career_posts(&self, member_id: i64) -> Result<Vec<PostSummary>, AppError> {
        self.repository.list_career_posts(member_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MemberRole, MemberStatus};
    use crate::domain::repositories::MockMemberRepository;
    use crate::infrastructure::cache::MockCacheService;

    fn member(id: i64) -> Member {
        Member {
            id,
            email: "lee@example.com".to_string(),
            nickname: "lee".to_string(),
            point: 12,
            rank_id: 1,
            rank_name: "Bronze".to_string(),
            role: MemberRole::User,
            status: MemberStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_member_info_cache_miss_populates_cache() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(member(id))));

        let mut cache = MockCacheService::new();
        cache.expect_get().times(1).returning(|_| Ok(None));
        cache
            .expect_set()
            .withf(|key, value, _| key == "member:5:profile" && value.contains("\"lee\""))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = MemberService::new(Arc::new(repo), Arc::new(cache));
        let detail = service.find_member_info(5).await.unwrap();

        assert_eq!(detail.id, 5);
        assert_eq!(detail.point, 12);
    }

    #[tokio::test]
    async fn test_find_member_info_cache_hit_skips_database() {
        let cached = serde_json::to_string(&MemberDetail::from(member(5))).unwrap();

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().never();

        let mut cache = MockCacheService::new();
        cache
            .expect_get()
            .returning(move |_| Ok(Some(cached.clone())));

        let service = MemberService::new(Arc::new(repo), Arc::new(cache));
        let detail = service.find_member_info(5).await.unwrap();

        assert_eq!(detail.nickname, "lee");
    }

    #[tokio::test]
    async fn test_find_member_info_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let mut cache = MockCacheService::new();
        cache.expect_get().returning(|_| Ok(None));
        cache.expect_set().never();

        let service = MemberService::new(Arc::new(repo), Arc::new(cache));
        let result = service.find_member_info(404).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

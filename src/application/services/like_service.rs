//! Likes on algorithm and coding posts.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Actor, Like, LikeTarget, POINTS_PER_LIKE};
use crate::domain::repositories::LikeRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, member_profile_key};

/// Service for liking posts.
///
/// A like awards the post's author points, which may promote their rank, so the
/// author's cached profile is invalidated afterwards.
pub struct LikeService<L: LikeRepository> {
    repository: Arc<L>,
    cache: Arc<dyn CacheService>,
}

impl<L: LikeRepository> LikeService<L> {
    pub fn new(repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Likes a post on behalf of the actor.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the post does not exist or is hidden
    /// - [`AppError::Validation`] if the actor wrote the post
    /// - [`AppError::Conflict`] if the actor already liked it
    pub async fn like_post(
        &self,
        actor: Actor,
        target: LikeTarget,
        post_id: i64,
    ) -> Result<Like, AppError> {
        let post = match self.repository.find_likeable(target, post_id).await? {
            Some(post) if post.visible => post,
            _ => {
                return Err(AppError::not_found(
                    "Post not found",
                    json!({ "target": target.as_str(), "post_id": post_id }),
                ));
            }
        };

        if post.author_id == actor.member_id {
            return Err(AppError::bad_request(
                "You cannot like your own post",
                json!({ "post_id": post_id }),
            ));
        }

        if self
            .repository
            .exists(actor.member_id, target, post_id)
            .await?
        {
            return Err(AppError::conflict(
                "Post already liked",
                json!({ "target": target.as_str(), "post_id": post_id }),
            ));
        }

        // The unique constraint still guards concurrent duplicates (409).
        let like = self
            .repository
            .create(actor.member_id, target, post_id, post.author_id, POINTS_PER_LIKE)
            .await?;

        let _ = self
            .cache
            .invalidate(&member_profile_key(post.author_id))
            .await;

        info!(
            target = target.as_str(),
            post_id,
            member_id = actor.member_id,
            "Post liked"
        );

        Ok(like)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LikeablePost, MemberRole};
    use crate::domain::repositories::MockLikeRepository;
    use crate::infrastructure::cache::{MockCacheService, NullCache};
    use chrono::Utc;

    fn actor() -> Actor {
        Actor::new(2, MemberRole::User)
    }

    fn likeable(author_id: i64, visible: bool) -> Option<LikeablePost> {
        Some(LikeablePost { author_id, visible })
    }

    #[tokio::test]
    async fn test_like_awards_author_and_invalidates_profile() {
        let mut repo = MockLikeRepository::new();
        repo.expect_find_likeable().returning(|_, _| Ok(likeable(7, true)));
        repo.expect_exists().returning(|_, _, _| Ok(false));
        repo.expect_create()
            .withf(|member_id, target, post_id, author_id, points| {
                *member_id == 2
                    && *target == LikeTarget::CodingPost
                    && *post_id == 11
                    && *author_id == 7
                    && *points == POINTS_PER_LIKE
            })
            .times(1)
            .returning(|member_id, target, post_id, _, _| {
                Ok(Like {
                    id: 1,
                    member_id,
                    target,
                    post_id,
                    created_at: Utc::now(),
                })
            });

        let mut cache = MockCacheService::new();
        cache
            .expect_invalidate()
            .withf(|key| key == "member:7:profile")
            .times(1)
            .returning(|_| Ok(()));

        let service = LikeService::new(Arc::new(repo), Arc::new(cache));
        let like = service
            .like_post(actor(), LikeTarget::CodingPost, 11)
            .await
            .unwrap();

        assert_eq!(like.post_id, 11);
    }

    #[tokio::test]
    async fn test_like_own_post() {
        let mut repo = MockLikeRepository::new();
        repo.expect_find_likeable().returning(|_, _| Ok(likeable(2, true)));
        repo.expect_create().never();

        let service = LikeService::new(Arc::new(repo), Arc::new(NullCache::new()));
        let result = service.like_post(actor(), LikeTarget::AlgoPost, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_like_twice() {
        let mut repo = MockLikeRepository::new();
        repo.expect_find_likeable().returning(|_, _| Ok(likeable(7, true)));
        repo.expect_exists().returning(|_, _, _| Ok(true));
        repo.expect_create().never();

        let service = LikeService::new(Arc::new(repo), Arc::new(NullCache::new()));
        let result = service.like_post(actor(), LikeTarget::AlgoPost, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_like_hidden_post() {
        let mut repo = MockLikeRepository::new();
        repo.expect_find_likeable().returning(|_, _| Ok(likeable(7, false)));

        let service = LikeService::new(Arc::new(repo), Arc::new(NullCache::new()));
        let result = service.like_post(actor(), LikeTarget::AlgoPost, 1).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

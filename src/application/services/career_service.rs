//! Career information board.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Actor, CareerPost, NewCareerPost, PostSummary};
use crate::domain::repositories::{CareerRepository, MemberRepository};
use crate::error::AppError;

pub struct CareerService<R: CareerRepository, M: MemberRepository> {
    repository: Arc<R>,
    members: Arc<M>,
}

impl<R: CareerRepository, M: MemberRepository> CareerService<R, M> {
    pub fn new(repository: Arc<R>, members: Arc<M>) -> Self {
        Self {
            repository,
            members,
        }
    }

    pub async fn create_post(
        &self,
        actor: Actor,
        title: String,
        content: String,
    ) -> Result<CareerPost, AppError> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::bad_request(
                "Title and content are required",
                json!({}),
            ));
        }

        let post = self
            .repository
            .create(NewCareerPost {
                member_id: actor.member_id,
                title,
                content,
            })
            .await?;

        info!(post_id = post.id, member_id = actor.member_id, "Career post created");
        Ok(post)
    }

    pub async fn list_posts(&self) -> Result<Vec<CareerPost>, AppError> {
        self.repository.list().await
    }

    pub async fn get_post(&self, post_id: i64) -> Result<CareerPost, AppError> {
        match self.repository.find(post_id).await? {
            Some(post) if post.visible => Ok(post),
            _ => Err(AppError::not_found(
                "Post not found",
                json!({ "post_id": post_id }),
            )),
        }
    }

    /// Visible career posts written by `member_id`, newest first.
    pub async fn list_member_posts(&self, member_id: i64) -> Result<Vec<PostSummary>, AppError> {
        self.members.list_career_posts(member_id).await
    }

    /// Hides a post. The author or an admin may do this.
    pub async fn delete_post(&self, actor: Actor, post_id: i64) -> Result<(), AppError> {
        let post = self.repository.find(post_id).await?.ok_or_else(|| {
            AppError::not_found("Post not found", json!({ "post_id": post_id }))
        })?;

        if !actor.can_manage(post.member_id) {
            return Err(AppError::forbidden(
                "Not allowed to delete this post",
                json!({ "post_id": post_id }),
            ));
        }

        if !self.repository.soft_delete(post_id).await? {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": post_id }),
            ));
        }

        info!(post_id, member_id = actor.member_id, "Career post deleted");
        Ok(())
    }
}

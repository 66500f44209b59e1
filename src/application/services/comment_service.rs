//! Comment threads shared by the algorithm, coding and study recruitment boards.
//!
//! Board services check that the parent post is visible before delegating
//! here; this module enforces the thread and ownership rules.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{
    Actor, Comment, CommentView, NewComment, validate_comment_content, validate_reply_parent,
};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

pub struct CommentService<C: CommentRepository> {
    repository: Arc<C>,
    board: &'static str,
}

impl<C: CommentRepository> CommentService<C> {
    /// `board` labels log lines (`algo`, `coding`, `study_recruit`).
    pub fn new(repository: Arc<C>, board: &'static str) -> Self {
        Self { repository, board }
    }

    /// Loads a visible comment.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the comment does not exist
    /// - [`AppError::Validation`] if it was deleted
    async fn visible_comment(&self, comment_id: i64) -> Result<Comment, AppError> {
        let comment = self
            .repository
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Comment not found", json!({ "comment_id": comment_id }))
            })?;

        if !comment.visible {
            return Err(AppError::bad_request(
                "Comment has already been deleted",
                json!({ "comment_id": comment_id }),
            ));
        }

        Ok(comment)
    }

    /// Adds a comment or a reply to a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank or oversized content, or a
    /// parent on another post or already deleted.
    /// Returns [`AppError::NotFound`] if the parent does not exist.
    pub async fn add(
        &self,
        member_id: i64,
        post_id: i64,
        parent_id: Option<i64>,
        content: String,
    ) -> Result<Comment, AppError> {
        validate_comment_content(&content)?;

        if let Some(parent_id) = parent_id {
            let parent = self.repository.find_comment(parent_id).await?;
            validate_reply_parent(post_id, parent_id, parent.as_ref())?;
        }

        let comment = self
            .repository
            .create_comment(NewComment {
                post_id,
                member_id,
                parent_id,
                content,
            })
            .await?;

        info!(
            board = self.board,
            post_id,
            comment_id = comment.id,
            "Comment added"
        );

        Ok(comment)
    }

    /// Edits a comment. Only its author may edit it.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the comment does not exist
    /// - [`AppError::Validation`] if it was deleted or the content is invalid
    /// - [`AppError::Forbidden`] if the actor is not the author
    pub async fn update(
        &self,
        actor: Actor,
        comment_id: i64,
        content: String,
    ) -> Result<Comment, AppError> {
        let comment = self.visible_comment(comment_id).await?;

        if comment.member_id != actor.member_id {
            return Err(AppError::forbidden(
                "Only the author can edit this comment",
                json!({ "comment_id": comment_id }),
            ));
        }

        validate_comment_content(&content)?;

        self.repository.update_comment(comment_id, &content).await
    }

    /// Soft-deletes a comment. Authors and admins may delete.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the comment does not exist
    /// - [`AppError::Validation`] if it was already deleted
    /// - [`AppError::Forbidden`] if the actor is neither author nor admin
    pub async fn delete(&self, actor: Actor, comment_id: i64) -> Result<(), AppError> {
        let comment = self.visible_comment(comment_id).await?;

        if !actor.can_manage(comment.member_id) {
            return Err(AppError::forbidden(
                "Only the author can delete this comment",
                json!({ "comment_id": comment_id }),
            ));
        }

        self.hide(comment).await
    }

    /// Soft-deletes any comment on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the actor is not an admin, otherwise
    /// the same errors as [`Self::delete`].
    pub async fn admin_delete(&self, actor: Actor, comment_id: i64) -> Result<(), AppError> {
        if !actor.is_admin() {
            return Err(AppError::forbidden(
                "Admin role required",
                json!({ "comment_id": comment_id }),
            ));
        }

        let comment = self.visible_comment(comment_id).await?;
        self.hide(comment).await
    }

    async fn hide(&self, comment: Comment) -> Result<(), AppError> {
        // Lost a race with a concurrent delete.
        if !self.repository.soft_delete_comment(comment.id).await? {
            return Err(AppError::bad_request(
                "Comment has already been deleted",
                json!({ "comment_id": comment.id }),
            ));
        }

        info!(
            board = self.board,
            post_id = comment.post_id,
            comment_id = comment.id,
            "Comment deleted"
        );

        Ok(())
    }

    /// Lists visible comments of a post ordered by id.
    pub async fn list(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        self.repository.list_comments(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MemberRole;
    use crate::domain::repositories::MockCommentRepository;
    use chrono::Utc;

    fn comment(id: i64, post_id: i64, member_id: i64, visible: bool) -> Comment {
        Comment {
            id,
            post_id,
            member_id,
            parent_id: None,
            content: "first".to_string(),
            visible,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(repo: MockCommentRepository) -> CommentService<MockCommentRepository> {
        CommentService::new(Arc::new(repo), "coding")
    }

    #[tokio::test]
    async fn test_add_reply_to_parent_on_same_post() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 10, 2, true))));
        repo.expect_create_comment()
            .withf(|c| c.post_id == 10 && c.parent_id == Some(1) && c.member_id == 3)
            .times(1)
            .returning(|c| {
                let mut created = comment(2, c.post_id, c.member_id, true);
                created.parent_id = c.parent_id;
                Ok(created)
            });

        let reply = service(repo)
            .add(3, 10, Some(1), "agreed".to_string())
            .await
            .unwrap();

        assert!(reply.is_reply());
    }

    #[tokio::test]
    async fn test_add_reply_to_parent_on_other_post() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 99, 2, true))));
        repo.expect_create_comment().never();

        let result = service(repo)
            .add(3, 10, Some(1), "agreed".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_reply_to_deleted_parent() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 10, 2, false))));
        repo.expect_create_comment().never();

        let result = service(repo)
            .add(3, 10, Some(1), "agreed".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_blank_comment() {
        let mut repo = MockCommentRepository::new();
        repo.expect_create_comment().never();

        let result = service(repo).add(3, 10, None, "   ".to_string()).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_by_other_member_is_forbidden() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 10, 2, true))));
        repo.expect_update_comment().never();

        let result = service(repo)
            .update(Actor::new(3, MemberRole::User), 1, "edited".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_delete_already_hidden() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 10, 2, false))));
        repo.expect_soft_delete_comment().never();

        let result = service(repo).delete(Actor::new(2, MemberRole::User), 1).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_admin() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment()
            .returning(|id| Ok(Some(comment(id, 10, 2, true))));
        repo.expect_soft_delete_comment()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(true));

        let result = service(repo).delete(Actor::new(9, MemberRole::Admin), 1).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_admin_delete_requires_admin() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment().never();

        let result = service(repo)
            .admin_delete(Actor::new(2, MemberRole::User), 1)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_admin_delete_unknown_comment() {
        let mut repo = MockCommentRepository::new();
        repo.expect_find_comment().returning(|_| Ok(None));

        let result = service(repo)
            .admin_delete(Actor::new(9, MemberRole::Admin), 1)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

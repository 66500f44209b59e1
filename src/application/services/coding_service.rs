//! Coding problem board: problems, solution posts, AI feedback and comments.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::application::services::comment_service::CommentService;
use crate::application::services::image_upload::upload_images;
use crate::domain::entities::{
    Actor, CodingPost, CodingPostSummary, CodingProblem, Comment, CommentView, FeedbackRequest,
    ImageUpload, NewCodingPost, NewCodingProblem,
};
use crate::domain::repositories::{CodingRepository, CommentRepository};
use crate::error::AppError;
use crate::infrastructure::feedback::FeedbackClient;
use crate::infrastructure::storage::ImageStorage;

/// Storage folder for solution post images.
pub const CODING_IMAGE_FOLDER: &str = "coding-posts";

/// Input for a new solution post.
#[derive(Debug, Clone)]
pub struct CodingPostDraft {
    pub problem_id: i64,
    pub title: String,
    pub content: String,
    pub images: Vec<ImageUpload>,
}

pub struct CodingService<R: CodingRepository, C: CommentRepository> {
    repository: Arc<R>,
    comments: CommentService<C>,
    storage: Arc<dyn ImageStorage>,
    feedback: Arc<dyn FeedbackClient>,
    max_image_bytes: usize,
}

impl<R: CodingRepository, C: CommentRepository> CodingService<R, C> {
    pub fn new(
        repository: Arc<R>,
        comment_repository: Arc<C>,
        storage: Arc<dyn ImageStorage>,
        feedback: Arc<dyn FeedbackClient>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            repository,
            comments: CommentService::new(comment_repository, "coding"),
            storage,
            feedback,
            max_image_bytes,
        }
    }

    async fn require_visible_problem(&self, id: i64) -> Result<CodingProblem, AppError> {
        match self.repository.find_problem(id).await? {
            Some(problem) if problem.visible => Ok(problem),
            _ => Err(AppError::not_found(
                "Problem not found",
                json!({ "problem_id": id }),
            )),
        }
    }

    async fn require_post(&self, id: i64) -> Result<CodingPost, AppError> {
        self.repository
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": id })))
    }

    async fn require_visible_post(&self, id: i64) -> Result<CodingPost, AppError> {
        let post = self.require_post(id).await?;
        if !post.visible {
            return Err(AppError::not_found("Post not found", json!({ "post_id": id })));
        }
        Ok(post)
    }

    /// Loads a post the actor is about to change.
    ///
    /// Missing posts are 404, deleted posts 400 and foreign posts 403.
    async fn require_managed_post(
        &self,
        actor: Actor,
        id: i64,
        allow_admin: bool,
    ) -> Result<CodingPost, AppError> {
        let post = self.require_post(id).await?;

        if !post.visible {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": id }),
            ));
        }

        let permitted = if allow_admin {
            actor.can_manage(post.member_id)
        } else {
            actor.member_id == post.member_id
        };

        if !permitted {
            return Err(AppError::forbidden(
                "Only the author can change this post",
                json!({ "post_id": id }),
            ));
        }

        Ok(post)
    }

    // Problems

    pub async fn create_problem(&self, problem: NewCodingProblem) -> Result<CodingProblem, AppError> {
        let problem = self.repository.create_problem(problem).await?;
        info!(problem_id = problem.id, "Coding problem created");
        Ok(problem)
    }

    pub async fn list_problems(&self) -> Result<Vec<CodingProblem>, AppError> {
        self.repository.list_problems().await
    }

    pub async fn get_problem(&self, id: i64) -> Result<CodingProblem, AppError> {
        self.require_visible_problem(id).await
    }

    // Posts

    /// Publishes a solution, asking the feedback service for a review first.
    ///
    /// Returns the new post id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the problem does not exist.
    /// Returns [`AppError::Upstream`] if the feedback service is configured but
    /// unreachable or replies with a malformed body; nothing is stored in that
    /// case.
    pub async fn create_post(&self, actor: Actor, draft: CodingPostDraft) -> Result<i64, AppError> {
        let problem = self.require_visible_problem(draft.problem_id).await?;

        for image in draft.images.iter().filter(|i| !i.is_empty()) {
            image.validate(self.max_image_bytes)?;
        }

        let feedback = if self.feedback.is_enabled() {
            let review = self
                .feedback
                .request_feedback(FeedbackRequest {
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                    problem: problem.title.clone(),
                })
                .await?;

            if review.is_none() {
                warn!(problem_id = problem.id, "Post created without AI feedback");
            }
            review
        } else {
            None
        };

        let image_urls = upload_images(
            self.storage.as_ref(),
            CODING_IMAGE_FOLDER,
            draft.images,
            self.max_image_bytes,
        )
        .await?;

        let post_id = self
            .repository
            .create_post(NewCodingPost {
                member_id: actor.member_id,
                problem_id: problem.id,
                title: draft.title,
                content: draft.content,
                feedback,
                image_urls,
            })
            .await?;

        info!(post_id, problem_id = problem.id, "Coding post created");

        Ok(post_id)
    }

    /// Uploads one more image for a post. Returns the image id and its URL.
    pub async fn add_image(
        &self,
        actor: Actor,
        post_id: i64,
        image: ImageUpload,
    ) -> Result<(i64, String), AppError> {
        self.require_managed_post(actor, post_id, true).await?;

        let url = upload_images(
            self.storage.as_ref(),
            CODING_IMAGE_FOLDER,
            vec![image],
            self.max_image_bytes,
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::internal("Image upload returned no URL", json!({})))?;

        let image_id = self.repository.add_image(post_id, &url).await?;
        Ok((image_id, url))
    }

    /// Edits title and content. Only the author may edit.
    pub async fn update_post(
        &self,
        actor: Actor,
        post_id: i64,
        title: String,
        content: String,
    ) -> Result<CodingPost, AppError> {
        self.require_managed_post(actor, post_id, false).await?;
        self.repository.update_post(post_id, &title, &content).await
    }

    /// Soft-deletes a post and resyncs the problem's post counter.
    /// Authors and admins may delete.
    pub async fn delete_post(&self, actor: Actor, post_id: i64) -> Result<(), AppError> {
        self.require_managed_post(actor, post_id, true).await?;

        if !self.repository.soft_delete_post(post_id).await? {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": post_id }),
            ));
        }

        info!(post_id, "Coding post deleted");
        Ok(())
    }

    pub async fn get_post(&self, id: i64) -> Result<CodingPost, AppError> {
        self.require_visible_post(id).await
    }

    pub async fn list_posts(
        &self,
        problem_id: Option<i64>,
    ) -> Result<Vec<CodingPostSummary>, AppError> {
        if let Some(problem_id) = problem_id {
            self.require_visible_problem(problem_id).await?;
        }
        self.repository.list_posts(problem_id).await
    }

    // Comments

    pub async fn add_comment(
        &self,
        actor: Actor,
        post_id: i64,
        parent_id: Option<i64>,
        content: String,
    ) -> Result<Comment, AppError> {
        self.require_visible_post(post_id).await?;
        self.comments
            .add(actor.member_id, post_id, parent_id, content)
            .await
    }

    pub async fn update_comment(
        &self,
        actor: Actor,
        comment_id: i64,
        content: String,
    ) -> Result<Comment, AppError> {
        self.comments.update(actor, comment_id, content).await
    }

    pub async fn delete_comment(&self, actor: Actor, comment_id: i64) -> Result<(), AppError> {
        self.comments.delete(actor, comment_id).await
    }

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        self.require_visible_post(post_id).await?;
        self.comments.list(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AiFeedback, MemberRole};
    use crate::domain::repositories::{MockCodingRepository, MockCommentRepository};
    use crate::infrastructure::feedback::{DisabledFeedbackClient, MockFeedbackClient};
    use crate::infrastructure::storage::NullStorage;
    use chrono::Utc;

    fn problem(id: i64) -> CodingProblem {
        CodingProblem {
            id,
            title: "Two Sum".to_string(),
            content: "find two numbers".to_string(),
            platform: "LeetCode".to_string(),
            difficulty: "Easy".to_string(),
            post_count: 0,
            visible: true,
            created_at: Utc::now(),
        }
    }

    fn post(id: i64, member_id: i64, visible: bool) -> CodingPost {
        CodingPost {
            id,
            member_id,
            problem_id: 1,
            title: "hash map".to_string(),
            content: "O(n)".to_string(),
            feedback: AiFeedback::default(),
            comment_count: 0,
            like_count: 0,
            visible,
            images: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft() -> CodingPostDraft {
        CodingPostDraft {
            problem_id: 1,
            title: "hash map".to_string(),
            content: "O(n)".to_string(),
            images: vec![],
        }
    }

    fn service(
        repo: MockCodingRepository,
        feedback: Arc<dyn FeedbackClient>,
    ) -> CodingService<MockCodingRepository, MockCommentRepository> {
        CodingService::new(
            Arc::new(repo),
            Arc::new(MockCommentRepository::new()),
            Arc::new(NullStorage::new()),
            feedback,
            1024,
        )
    }

    fn member(id: i64) -> Actor {
        Actor::new(id, MemberRole::User)
    }

    #[tokio::test]
    async fn test_create_post_stores_feedback() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_problem().returning(|id| Ok(Some(problem(id))));
        repo.expect_create_post()
            .withf(|p| {
                p.member_id == 4
                    && p.feedback.as_ref().and_then(|f| f.big_o.as_deref()) == Some("O(n)")
            })
            .times(1)
            .returning(|_| Ok(42));

        let mut feedback = MockFeedbackClient::new();
        feedback.expect_is_enabled().return_const(true);
        feedback
            .expect_request_feedback()
            .withf(|r| r.problem == "Two Sum")
            .times(1)
            .returning(|_| {
                Ok(Some(AiFeedback {
                    big_o: Some("O(n)".to_string()),
                    ..AiFeedback::default()
                }))
            });

        let id = service(repo, Arc::new(feedback))
            .create_post(member(4), draft())
            .await
            .unwrap();

        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_create_post_feedback_failure_persists_nothing() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_problem().returning(|id| Ok(Some(problem(id))));
        repo.expect_create_post().never();

        let mut feedback = MockFeedbackClient::new();
        feedback.expect_is_enabled().return_const(true);
        feedback
            .expect_request_feedback()
            .returning(|_| Err(AppError::upstream("Feedback service unavailable", json!({}))));

        let result = service(repo, Arc::new(feedback))
            .create_post(member(4), draft())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_create_post_without_feedback_service() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_problem().returning(|id| Ok(Some(problem(id))));
        repo.expect_create_post()
            .withf(|p| p.feedback.is_none())
            .times(1)
            .returning(|_| Ok(1));

        let result = service(repo, Arc::new(DisabledFeedbackClient))
            .create_post(member(4), draft())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_post_unknown_problem() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_problem().returning(|_| Ok(None));
        repo.expect_create_post().never();

        let result = service(repo, Arc::new(DisabledFeedbackClient))
            .create_post(member(4), draft())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_post_by_other_member() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 4, true))));
        repo.expect_update_post().never();

        let result = service(repo, Arc::new(DisabledFeedbackClient))
            .update_post(member(5), 1, "t".to_string(), "c".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_admin_cannot_edit_but_can_delete() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 4, true))));
        repo.expect_update_post().never();
        repo.expect_soft_delete_post().times(1).returning(|_| Ok(true));

        let service = service(repo, Arc::new(DisabledFeedbackClient));
        let admin = Actor::new(9, MemberRole::Admin);

        let edit = service
            .update_post(admin, 1, "t".to_string(), "c".to_string())
            .await;
        assert!(matches!(edit.unwrap_err(), AppError::Forbidden { .. }));

        assert!(service.delete_post(admin, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_hidden_post() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 4, false))));
        repo.expect_soft_delete_post().never();

        let result = service(repo, Arc::new(DisabledFeedbackClient))
            .delete_post(member(4), 1)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_comment_to_hidden_post() {
        let mut repo = MockCodingRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, 4, false))));

        let result = service(repo, Arc::new(DisabledFeedbackClient))
            .add_comment(member(5), 1, None, "nice".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

//! Algorithm learning board: roadmaps, posts, quizzes and their comments.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::application::services::comment_service::CommentService;
use crate::application::services::image_upload::upload_images;
use crate::domain::entities::{
    Actor, AlgoPost, AlgoPostPatch, AlgoPostSummary, AlgoQuizPatch, AlgoQuizQuestion, AlgoRoadmap,
    Comment, CommentView, ImageUpload, NewAlgoPost, NewAlgoQuiz, NewAlgoRoadmap,
};
use crate::domain::repositories::{AlgoRepository, CommentRepository};
use crate::error::AppError;
use crate::infrastructure::storage::ImageStorage;

/// Storage folder for algorithm post images.
pub const ALGO_IMAGE_FOLDER: &str = "algo-posts";

/// Service for the algorithm learning board.
///
/// Content is written by admins (routes enforce the role); members read it,
/// answer quizzes and comment.
pub struct AlgoService<A: AlgoRepository, C: CommentRepository> {
    repository: Arc<A>,
    comments: CommentService<C>,
    storage: Arc<dyn ImageStorage>,
    max_image_bytes: usize,
}

impl<A: AlgoRepository, C: CommentRepository> AlgoService<A, C> {
    pub fn new(
        repository: Arc<A>,
        comment_repository: Arc<C>,
        storage: Arc<dyn ImageStorage>,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            repository,
            comments: CommentService::new(comment_repository, "algo"),
            storage,
            max_image_bytes,
        }
    }

    async fn require_roadmap(&self, id: i64) -> Result<AlgoRoadmap, AppError> {
        self.repository
            .find_roadmap(id)
            .await?
            .ok_or_else(|| AppError::not_found("Roadmap not found", json!({ "roadmap_id": id })))
    }

    async fn require_post(&self, id: i64) -> Result<AlgoPost, AppError> {
        self.repository
            .find_post(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": id })))
    }

    /// A post that members can see. Hidden posts are reported as missing.
    async fn require_visible_post(&self, id: i64) -> Result<AlgoPost, AppError> {
        let post = self.require_post(id).await?;
        if !post.visible {
            return Err(AppError::not_found("Post not found", json!({ "post_id": id })));
        }
        Ok(post)
    }

    /// A post that an admin may still edit. Hidden posts are rejected as deleted.
    async fn require_editable_post(&self, id: i64) -> Result<AlgoPost, AppError> {
        let post = self.require_post(id).await?;
        if !post.visible {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": id }),
            ));
        }
        Ok(post)
    }

    async fn require_visible_quiz(&self, id: i64) -> Result<AlgoQuizQuestion, AppError> {
        let quiz = self
            .repository
            .find_quiz(id)
            .await?
            .ok_or_else(|| AppError::not_found("Quiz not found", json!({ "quiz_id": id })))?;

        if !quiz.visible {
            return Err(AppError::bad_request(
                "Quiz has already been deleted",
                json!({ "quiz_id": id }),
            ));
        }

        Ok(quiz)
    }

    // Roadmaps

    pub async fn create_roadmap(&self, roadmap: NewAlgoRoadmap) -> Result<AlgoRoadmap, AppError> {
        let roadmap = self.repository.create_roadmap(roadmap).await?;
        info!(roadmap_id = roadmap.id, "Roadmap created");
        Ok(roadmap)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the roadmap does not exist.
    pub async fn update_roadmap(
        &self,
        id: i64,
        roadmap: NewAlgoRoadmap,
    ) -> Result<AlgoRoadmap, AppError> {
        self.repository.update_roadmap(id, roadmap).await
    }

    pub async fn list_roadmaps(&self) -> Result<Vec<AlgoRoadmap>, AppError> {
        self.repository.list_roadmaps().await
    }

    // Posts

    /// Creates a post under a roadmap, uploading its images first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the roadmap does not exist.
    /// Returns [`AppError::Validation`] if an image is invalid.
    pub async fn create_post(
        &self,
        actor: Actor,
        roadmap_id: i64,
        title: String,
        content: String,
        images: Vec<ImageUpload>,
    ) -> Result<AlgoPost, AppError> {
        self.require_roadmap(roadmap_id).await?;

        let image_urls = upload_images(
            self.storage.as_ref(),
            ALGO_IMAGE_FOLDER,
            images,
            self.max_image_bytes,
        )
        .await?;

        let post = self
            .repository
            .create_post(NewAlgoPost {
                roadmap_id,
                member_id: actor.member_id,
                title,
                content,
                image_urls,
            })
            .await?;

        info!(post_id = post.id, roadmap_id, "Algo post created");

        Ok(post)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown post and
    /// [`AppError::Validation`] for a deleted one.
    pub async fn update_post(&self, id: i64, patch: AlgoPostPatch) -> Result<AlgoPost, AppError> {
        self.require_editable_post(id).await?;
        self.repository.update_post(id, patch).await
    }

    /// Soft-deletes a post and decrements its roadmap's post counter.
    pub async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        self.require_editable_post(id).await?;

        if !self.repository.soft_delete_post(id).await? {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": id }),
            ));
        }

        info!(post_id = id, "Algo post deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist or is hidden.
    pub async fn get_post(&self, id: i64) -> Result<AlgoPost, AppError> {
        self.require_visible_post(id).await
    }

    pub async fn list_posts(&self, roadmap_id: i64) -> Result<Vec<AlgoPostSummary>, AppError> {
        self.require_roadmap(roadmap_id).await?;
        self.repository.list_posts(roadmap_id).await
    }

    // Quizzes

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the options break the quiz rules
    /// or the post was deleted, [`AppError::NotFound`] for an unknown post.
    pub async fn create_quiz(&self, quiz: NewAlgoQuiz) -> Result<AlgoQuizQuestion, AppError> {
        quiz.validate()?;
        self.require_editable_post(quiz.post_id).await?;

        let quiz = self.repository.create_quiz(quiz).await?;
        info!(quiz_id = quiz.id, post_id = quiz.post_id, "Quiz created");
        Ok(quiz)
    }

    /// Updates the question text and option contents.
    ///
    /// Correctness flags and the option set itself cannot change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank text or an option id that is
    /// not part of the quiz.
    pub async fn update_quiz(
        &self,
        id: i64,
        patch: AlgoQuizPatch,
    ) -> Result<AlgoQuizQuestion, AppError> {
        let quiz = self.require_visible_quiz(id).await?;

        if patch.question.trim().is_empty()
            || patch.options.iter().any(|(_, c)| c.trim().is_empty())
        {
            return Err(AppError::bad_request(
                "Quiz text must not be empty",
                json!({ "quiz_id": id }),
            ));
        }

        let known: HashSet<i64> = quiz.options.iter().map(|o| o.id).collect();
        if let Some((unknown, _)) = patch.options.iter().find(|(oid, _)| !known.contains(oid)) {
            return Err(AppError::bad_request(
                "Option does not belong to this quiz",
                json!({ "quiz_id": id, "option_id": unknown }),
            ));
        }

        self.repository.update_quiz(id, patch).await
    }

    pub async fn delete_quiz(&self, id: i64) -> Result<(), AppError> {
        self.require_visible_quiz(id).await?;

        if !self.repository.soft_delete_quiz(id).await? {
            return Err(AppError::bad_request(
                "Quiz has already been deleted",
                json!({ "quiz_id": id }),
            ));
        }

        info!(quiz_id = id, "Quiz deleted");
        Ok(())
    }

    /// Lists visible quizzes of a visible post. Callers must not expose correctness flags.
    pub async fn list_quizzes(&self, post_id: i64) -> Result<Vec<AlgoQuizQuestion>, AppError> {
        self.require_visible_post(post_id).await?;
        self.repository.list_quizzes(post_id).await
    }

    /// Checks a member's answer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown quiz and
    /// [`AppError::Validation`] for a deleted quiz or a foreign option.
    pub async fn submit_quiz_answer(&self, quiz_id: i64, option_id: i64) -> Result<bool, AppError> {
        let quiz = self.require_visible_quiz(quiz_id).await?;

        let option = quiz
            .options
            .iter()
            .find(|o| o.id == option_id)
            .ok_or_else(|| {
                AppError::bad_request(
                    "Option does not belong to this quiz",
                    json!({ "quiz_id": quiz_id, "option_id": option_id }),
                )
            })?;

        Ok(option.is_correct)
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

    pub async fn admin_delete_comment(
        &self,
        actor: Actor,
        comment_id: i64,
    ) -> Result<(), AppError> {
        self.comments.admin_delete(actor, comment_id).await
    }

    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentView>, AppError> {
        self.require_visible_post(post_id).await?;
        self.comments.list(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AlgoQuizOption, MemberRole, NewAlgoQuizOption};
    use crate::domain::repositories::{MockAlgoRepository, MockCommentRepository};
    use crate::infrastructure::storage::{MockImageStorage, NullStorage};
    use chrono::Utc;

    fn roadmap(id: i64) -> AlgoRoadmap {
        AlgoRoadmap {
            id,
            title: "Graphs".to_string(),
            description: String::new(),
            display_order: 1,
            post_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn post(id: i64, visible: bool) -> AlgoPost {
        AlgoPost {
            id,
            roadmap_id: 1,
            member_id: 1,
            title: "BFS".to_string(),
            content: "queue".to_string(),
            comment_count: 0,
            like_count: 0,
            visible,
            images: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quiz(id: i64, visible: bool) -> AlgoQuizQuestion {
        AlgoQuizQuestion {
            id,
            post_id: 1,
            question: "BFS uses?".to_string(),
            visible,
            options: vec![
                AlgoQuizOption {
                    id: 10,
                    content: "stack".to_string(),
                    is_correct: false,
                },
                AlgoQuizOption {
                    id: 11,
                    content: "queue".to_string(),
                    is_correct: true,
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        repo: MockAlgoRepository,
    ) -> AlgoService<MockAlgoRepository, MockCommentRepository> {
        AlgoService::new(
            Arc::new(repo),
            Arc::new(MockCommentRepository::new()),
            Arc::new(NullStorage::new()),
            1024,
        )
    }

    fn admin() -> Actor {
        Actor::new(1, MemberRole::Admin)
    }

    #[tokio::test]
    async fn test_create_post_uploads_images_in_order() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_roadmap()
            .returning(|id| Ok(Some(roadmap(id))));
        repo.expect_create_post()
            .withf(|p| p.image_urls == vec!["u/first.png".to_string(), "u/second.png".to_string()])
            .times(1)
            .returning(|p| {
                let mut created = post(5, true);
                created.images = p.image_urls;
                Ok(created)
            });

        let mut storage = MockImageStorage::new();
        storage
            .expect_upload()
            .returning(|_, image| Ok(format!("u/{}", image.file_name)));

        let service = AlgoService::new(
            Arc::new(repo),
            Arc::new(MockCommentRepository::new()),
            Arc::new(storage),
            1024,
        );

        let images = ["first.png", "second.png"]
            .iter()
            .map(|name| ImageUpload {
                file_name: name.to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1; 8],
            })
            .collect();

        let created = service
            .create_post(admin(), 1, "BFS".to_string(), "queue".to_string(), images)
            .await
            .unwrap();

        assert_eq!(created.images.len(), 2);
    }

    #[tokio::test]
    async fn test_create_post_unknown_roadmap() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_roadmap().returning(|_| Ok(None));
        repo.expect_create_post().never();

        let result = service(repo)
            .create_post(admin(), 9, "BFS".to_string(), "queue".to_string(), vec![])
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_hidden_post_is_rejected() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, false))));
        repo.expect_update_post().never();

        let result = service(repo)
            .update_post(
                1,
                AlgoPostPatch {
                    title: "t".to_string(),
                    content: "c".to_string(),
                    image_urls: None,
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_hidden_post_is_not_found() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_post()
            .returning(|id| Ok(Some(post(id, false))));

        let result = service(repo).get_post(1).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_quiz_rejects_two_correct_options() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_create_quiz().never();

        let result = service(repo)
            .create_quiz(NewAlgoQuiz {
                post_id: 1,
                question: "BFS uses?".to_string(),
                options: vec![
                    NewAlgoQuizOption {
                        content: "queue".to_string(),
                        is_correct: true,
                    },
                    NewAlgoQuizOption {
                        content: "deque".to_string(),
                        is_correct: true,
                    },
                ],
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_quiz_unknown_option() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_quiz().returning(|id| Ok(Some(quiz(id, true))));
        repo.expect_update_quiz().never();

        let result = service(repo)
            .update_quiz(
                3,
                AlgoQuizPatch {
                    question: "BFS uses which structure?".to_string(),
                    options: vec![(10, "stack".to_string()), (99, "heap".to_string())],
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_submit_quiz_answer() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_quiz().returning(|id| Ok(Some(quiz(id, true))));

        let service = service(repo);

        assert!(service.submit_quiz_answer(3, 11).await.unwrap());
        assert!(!service.submit_quiz_answer(3, 10).await.unwrap());
        assert!(matches!(
            service.submit_quiz_answer(3, 42).await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_quiz_twice() {
        let mut repo = MockAlgoRepository::new();
        repo.expect_find_quiz().returning(|id| Ok(Some(quiz(id, false))));
        repo.expect_soft_delete_quiz().never();

        let result = service(repo).delete_quiz(3).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}

//! Study recruitment: posts, applications and comments.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::application::services::comment_service::CommentService;
use crate::domain::entities::{
    Actor, ApplicantStatus, Comment, CommentView, RecruitStatus, StudyRecruitApplicant,
    StudyRecruitDetail, StudyRecruitPost, StudyRecruitPostInput, StudyRecruitSummary,
};
use crate::domain::repositories::{CommentRepository, StudyRecruitRepository};
use crate::error::AppError;

pub struct StudyRecruitService<R: StudyRecruitRepository, C: CommentRepository> {
    repository: Arc<R>,
    comments: CommentService<C>,
}

impl<R: StudyRecruitRepository, C: CommentRepository> StudyRecruitService<R, C> {
    pub fn new(repository: Arc<R>, comment_repository: Arc<C>) -> Self {
        Self {
            repository,
            comments: CommentService::new(comment_repository, "study_recruit"),
        }
    }

    async fn require_post(&self, id: i64) -> Result<StudyRecruitPost, AppError> {
        match self.repository.find_post(id).await? {
            Some(post) if post.visible => Ok(post),
            _ => Err(AppError::not_found("Post not found", json!({ "post_id": id }))),
        }
    }

    /// Loads a visible post written by the actor.
    ///
    /// Edit and delete report a foreign, missing or deleted post the same way.
    async fn require_own_post(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<StudyRecruitPost, AppError> {
        match self.repository.find_post(id).await? {
            Some(post) if post.visible && post.member_id == actor.member_id => Ok(post),
            _ => Err(AppError::bad_request(
                "No permission or post does not exist",
                json!({ "post_id": id }),
            )),
        }
    }

    /// Loads a visible post and checks that the actor wrote it.
    async fn require_authored_post(
        &self,
        actor: Actor,
        id: i64,
    ) -> Result<StudyRecruitPost, AppError> {
        let post = self.require_post(id).await?;

        if post.member_id != actor.member_id {
            return Err(AppError::forbidden(
                "Only the author can manage this recruitment",
                json!({ "post_id": id }),
            ));
        }

        Ok(post)
    }

    // Posts

    /// Opens a new recruitment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if capacity or schedule rules are broken.
    pub async fn create_post(
        &self,
        actor: Actor,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError> {
        input.validate()?;

        let post = self.repository.create_post(actor.member_id, input).await?;
        info!(post_id = post.id, member_id = actor.member_id, "Study recruitment opened");
        Ok(post)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the actor is not the author or the
    /// post is missing or deleted.
    pub async fn update_post(
        &self,
        actor: Actor,
        post_id: i64,
        input: StudyRecruitPostInput,
    ) -> Result<StudyRecruitPost, AppError> {
        input.validate()?;
        self.require_own_post(actor, post_id).await?;
        self.repository.update_post(post_id, input).await
    }

    pub async fn delete_post(&self, actor: Actor, post_id: i64) -> Result<(), AppError> {
        self.require_own_post(actor, post_id).await?;

        if !self.repository.soft_delete_post(post_id).await? {
            return Err(AppError::bad_request(
                "Post has already been deleted",
                json!({ "post_id": post_id }),
            ));
        }

        info!(post_id, "Study recruitment deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if recruitment is already closed.
    pub async fn close_recruitment(&self, actor: Actor, post_id: i64) -> Result<(), AppError> {
        let post = self.require_authored_post(actor, post_id).await?;

        if post.status == RecruitStatus::Closed {
            return Err(AppError::bad_request(
                "Recruitment is already closed",
                json!({ "post_id": post_id }),
            ));
        }

        self.repository
            .set_status(post_id, RecruitStatus::Closed)
            .await?;

        info!(post_id, "Study recruitment closed");
        Ok(())
    }

    pub async fn list_posts(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<StudyRecruitSummary>, AppError> {
        self.repository.list_posts(offset, limit).await
    }

    pub async fn get_detail(&self, post_id: i64) -> Result<StudyRecruitDetail, AppError> {
        self.repository
            .find_detail(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "post_id": post_id })))
    }

    // Applicants

    /// Applies to a recruitment as a pending applicant.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the post does not exist or is hidden
    /// - [`AppError::Validation`] if recruitment is closed or expired, the
    ///   actor is the author, or approved participants already fill capacity
    /// - [`AppError::Conflict`] on a repeated application
    pub async fn apply(&self, actor: Actor, post_id: i64) -> Result<StudyRecruitApplicant, AppError> {
        let post = self.require_post(post_id).await?;

        if !post.accepts_applications(Utc::now()) {
            return Err(AppError::bad_request(
                "Recruitment is closed",
                json!({ "post_id": post_id }),
            ));
        }

        if post.member_id == actor.member_id {
            return Err(AppError::bad_request(
                "The author cannot apply to their own study",
                json!({ "post_id": post_id }),
            ));
        }

        if self
            .repository
            .find_applicant(post_id, actor.member_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Already applied to this study",
                json!({ "post_id": post_id }),
            ));
        }

        let approved = self.repository.count_approved(post_id).await?;
        if approved >= i64::from(post.capacity) {
            return Err(AppError::bad_request(
                "Study is already full",
                json!({ "post_id": post_id, "capacity": post.capacity }),
            ));
        }

        let applicant = self
            .repository
            .create_applicant(post_id, actor.member_id)
            .await?;

        info!(post_id, applicant_id = applicant.id, "Study application received");
        Ok(applicant)
    }

    /// Lists applicants. Only the author may see them.
    pub async fn list_applicants(
        &self,
        actor: Actor,
        post_id: i64,
    ) -> Result<Vec<StudyRecruitApplicant>, AppError> {
        self.require_authored_post(actor, post_id).await?;
        self.repository.list_applicants(post_id).await
    }

    /// Approves or rejects a pending applicant.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the applicant is not on this post
    /// - [`AppError::Validation`] if the applicant is not pending, or approving
    ///   would exceed capacity
    pub async fn decide_applicant(
        &self,
        actor: Actor,
        post_id: i64,
        applicant_id: i64,
        approve: bool,
    ) -> Result<StudyRecruitApplicant, AppError> {
        let post = self.require_authored_post(actor, post_id).await?;

        let applicant = match self.repository.find_applicant_by_id(applicant_id).await? {
            Some(a) if a.post_id == post_id => a,
            _ => {
                return Err(AppError::not_found(
                    "Applicant not found",
                    json!({ "post_id": post_id, "applicant_id": applicant_id }),
                ));
            }
        };

        if applicant.status != ApplicantStatus::Pending {
            return Err(AppError::bad_request(
                "Applicant has already been processed",
                json!({ "applicant_id": applicant_id, "status": applicant.status.as_str() }),
            ));
        }

        let status = if approve {
            let approved = self.repository.count_approved(post_id).await?;
            if approved >= i64::from(post.capacity) {
                return Err(AppError::bad_request(
                    "Study is already full",
                    json!({ "post_id": post_id, "capacity": post.capacity }),
                ));
            }
            ApplicantStatus::Approved
        } else {
            ApplicantStatus::Rejected
        };

        let applicant = self
            .repository
            .set_applicant_status(applicant_id, status)
            .await?;

        info!(post_id, applicant_id, status = status.as_str(), "Applicant processed");
        Ok(applicant)
    }

    /// Withdraws the actor's own application while it is still pending.
    pub async fn cancel_application(&self, actor: Actor, post_id: i64) -> Result<(), AppError> {
        let applicant = self
            .repository
            .find_applicant(post_id, actor.member_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Application not found", json!({ "post_id": post_id }))
            })?;

        if applicant.status != ApplicantStatus::Pending {
            return Err(AppError::bad_request(
                "Only pending applications can be cancelled",
                json!({ "post_id": post_id, "status": applicant.status.as_str() }),
            ));
        }

        self.repository.delete_applicant(applicant.id).await?;

        info!(post_id, applicant_id = applicant.id, "Application cancelled");
        Ok(())
    }

    // Comments

    pub async fn create_comment(
        &self,
        actor: Actor,
        post_id: i64,
        parent_id: Option<i64>,
        content: String,
    ) -> Result<Comment, AppError> {
        self.require_post(post_id).await?;
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
        self.require_post(post_id).await?;
        self.comments.list(post_id).await
    }
}

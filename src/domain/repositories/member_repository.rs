//! Repository trait for members and ranks.

use crate::domain::entities::{Member, MemberCredentials, MemberRole, NewMember, PostSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for member accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMemberRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Creates a member with the default rank and the `USER` role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or nickname is taken.
    /// Returns [`AppError::Internal`] if the default rank is missing or on database errors.
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError>;

    /// Finds a member by id, joined with the rank name.
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, AppError>;

    /// Finds a member by email, joined with the rank name.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError>;

    /// Loads the password hash and status for login.
    async fn find_credentials(&self, email: &str) -> Result<Option<MemberCredentials>, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, AppError>;

    /// Changes the platform role of a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the member does not exist.
    async fn set_role(&self, id: i64, role: MemberRole) -> Result<(), AppError>;

    /// Lists the member's visible career posts, newest first.
    async fn list_career_posts(&self, member_id: i64) -> Result<Vec<PostSummary>, AppError>;
}

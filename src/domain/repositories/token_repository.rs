//! Repository trait for member access tokens.

use crate::domain::entities::{MemberRole, MemberStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Access token issued at login.
///
/// Tokens are stored as HMAC-SHA256 hashes; the raw value is shown once.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub id: i64,
    pub member_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Owner of a valid token, as seen by the authentication middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOwner {
    pub member_id: i64,
    pub role: MemberRole,
    pub status: MemberStatus,
}

/// Repository interface for access token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to its owner.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(owner))` if the token exists and is not revoked
    /// - `Ok(None)` if the token is unknown or revoked
    async fn find_owner(&self, token_hash: &str) -> Result<Option<TokenOwner>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token hash for a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash already exists.
    async fn create_token(
        &self,
        member_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<AccessToken, AppError>;

    /// Lists all tokens of a member, newest first.
    async fn list_for_member(&self, member_id: i64) -> Result<Vec<AccessToken>, AppError>;

    /// Revokes one token by hash. Returns false if it was unknown or already revoked.
    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Revokes every active token of a member and returns how many were revoked.
    async fn revoke_all_for_member(&self, member_id: i64) -> Result<u64, AppError>;
}

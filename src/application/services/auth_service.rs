//! Registration, login and bearer token authentication.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Actor, Member, MemberStatus, NewMember};
use crate::domain::repositories::{MemberRepository, TokenRepository};
use crate::error::AppError;
use crate::utils::token::{generate_token, hash_token};

/// Name recorded for tokens issued by [`AuthService::login`].
const LOGIN_TOKEN_NAME: &str = "login";

/// Input for member registration, already shape-validated by the API layer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// A successful login: the raw token is returned exactly once.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub member: Member,
}

/// Service for member accounts and their access tokens.
///
/// Passwords are stored as bcrypt hashes. Tokens are hashed with HMAC-SHA256
/// (keyed by `signing_secret`) before storage and comparison, so read-only
/// database access is not enough to forge or verify a token.
pub struct AuthService<M: MemberRepository, T: TokenRepository> {
    member_repository: Arc<M>,
    token_repository: Arc<T>,
    signing_secret: String,
    bcrypt_cost: u32,
}

impl<M: MemberRepository, T: TokenRepository> AuthService<M, T> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `member_repository` - member account storage
    /// - `token_repository` - token storage
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(member_repository: Arc<M>, token_repository: Arc<T>, signing_secret: String) -> Self {
        Self {
            member_repository,
            token_repository,
            signing_secret,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt work factor. Tests use the minimum cost.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    fn hash_token(&self, token: &str) -> String {
        hash_token(&self.signing_secret, token)
    }

    /// Registers a new member with the default rank and the `USER` role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or nickname is taken.
    /// Returns [`AppError::Internal`] if the default rank is missing.
    pub async fn register(&self, registration: Registration) -> Result<Member, AppError> {
        if self
            .member_repository
            .exists_by_email(&registration.email)
            .await?
        {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "email": registration.email }),
            ));
        }

        if self
            .member_repository
            .exists_by_nickname(&registration.nickname)
            .await?
        {
            return Err(AppError::conflict(
                "Nickname is already taken",
                json!({ "nickname": registration.nickname }),
            ));
        }

        let cost = self.bcrypt_cost;
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))?;

        let member = self
            .member_repository
            .create(NewMember {
                email: registration.email,
                password_hash,
                nickname: registration.nickname,
            })
            .await?;

        info!(member_id = member.id, "Member registered");

        Ok(member)
    }

    /// Verifies credentials and issues a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong password,
    /// with the same message in both cases.
    /// Returns [`AppError::Forbidden`] if the account is suspended.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password", json!({}));

        let credentials = self
            .member_repository
            .find_credentials(email)
            .await?
            .ok_or_else(invalid)?;

        let password = password.to_string();
        let stored_hash = credentials.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored_hash))
            .await
            .map_err(|e| AppError::internal("Password check failed", json!({ "reason": e.to_string() })))?
            .unwrap_or(false);

        if !verified {
            return Err(invalid());
        }

        if credentials.status != MemberStatus::Active {
            return Err(AppError::forbidden(
                "Account is suspended",
                json!({ "member_id": credentials.member_id }),
            ));
        }

        let member = self
            .member_repository
            .find_by_id(credentials.member_id)
            .await?
            .ok_or_else(invalid)?;

        let token = generate_token();
        self.token_repository
            .create_token(member.id, LOGIN_TOKEN_NAME, &self.hash_token(&token))
            .await?;

        info!(member_id = member.id, "Member logged in");

        Ok(IssuedToken { token, member })
    }

    /// Revokes the presented token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or already revoked.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let revoked = self
            .token_repository
            .revoke_by_hash(&self.hash_token(token))
            .await?;

        if !revoked {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        }

        Ok(())
    }

    /// Resolves a raw bearer token to the acting member.
    ///
    /// On success, updates the token's `last_used_at` on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Forbidden`] if the member is not active.
    pub async fn authenticate(&self, token: &str) -> Result<Actor, AppError> {
        let token_hash = self.hash_token(token);

        let owner = self
            .token_repository
            .find_owner(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        if owner.status != MemberStatus::Active {
            return Err(AppError::forbidden(
                "Account is suspended",
                json!({ "member_id": owner.member_id }),
            ));
        }

        let _ = self.token_repository.update_last_used(&token_hash).await;

        Ok(Actor::new(owner.member_id, owner.role))
    }
}

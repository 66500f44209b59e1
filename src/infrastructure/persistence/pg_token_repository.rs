//! PostgreSQL implementation of token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{AccessToken, TokenOwner, TokenRepository};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: i64,
    member_id: i64,
    name: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<TokenRow> for AccessToken {
    fn from(r: TokenRow) -> Self {
        AccessToken {
            id: r.id,
            member_id: r.member_id,
            name: r.name,
            created_at: r.created_at,
            last_used_at: r.last_used_at,
            revoked_at: r.revoked_at,
        }
    }
}

/// PostgreSQL repository for access token storage and validation.
///
/// Stores hashed tokens (HMAC-SHA256). Raw tokens are never persisted.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<TokenOwner>, AppError> {
        let row: Option<(i64, String, String)> = sqlx::query_as(
            r#"
            SELECT m.id, m.role, m.status
            FROM member_tokens t
            JOIN members m ON m.id = t.member_id
            WHERE t.token_hash = $1
              AND t.revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|(member_id, role, status)| {
            Ok(TokenOwner {
                member_id,
                role: role.parse()?,
                status: status.parse()?,
            })
        })
        .transpose()
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE member_tokens
            SET last_used_at = NOW()
            WHERE token_hash = $1
              AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn create_token(
        &self,
        member_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<AccessToken, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(
            r#"
            INSERT INTO member_tokens (member_id, name, token_hash)
            VALUES ($1, $2, $3)
            RETURNING id, member_id, name, created_at, last_used_at, revoked_at
            "#,
        )
        .bind(member_id)
        .bind(name)
        .bind(token_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_for_member(&self, member_id: i64) -> Result<Vec<AccessToken>, AppError> {
        let rows = sqlx::query_as::<_, TokenRow>(
            r#"
            SELECT id, member_id, name, created_at, last_used_at, revoked_at
            FROM member_tokens
            WHERE member_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AccessToken::from).collect())
    }

    async fn revoke_by_hash(&self, token_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE member_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_member(&self, member_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE member_tokens
            SET revoked_at = NOW()
            WHERE member_id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(member_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}

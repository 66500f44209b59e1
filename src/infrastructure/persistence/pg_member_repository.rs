//! PostgreSQL implementation of member repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    DEFAULT_RANK_ID, Member, MemberCredentials, MemberRole, NewMember, PostSummary,
};
use crate::domain::repositories::MemberRepository;
use crate::error::AppError;

const MEMBER_COLUMNS: &str = r#"
    m.id, m.email, m.nickname, m.point, m.rank_id, r.name AS rank_name,
    m.role, m.status, m.created_at
"#;

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    nickname: String,
    point: i32,
    rank_id: i64,
    rank_name: String,
    role: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: row.id,
            email: row.email,
            nickname: row.nickname,
            point: row.point,
            rank_id: row.rank_id,
            rank_name: row.rank_name,
            role: row.role.parse()?,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    password_hash: String,
    status: String,
}

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for member accounts.
pub struct PgMemberRepository {
    pool: Arc<PgPool>,
}

impl PgMemberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, arg: &str) -> Result<Option<Member>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members m JOIN member_ranks r ON r.id = m.rank_id WHERE {filter}"
        );

        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(arg)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Member::try_from).transpose()
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn create(&self, new_member: NewMember) -> Result<Member, AppError> {
        let mut tx = self.pool.begin().await?;

        let rank: Option<(i64,)> = sqlx::query_as("SELECT id FROM member_ranks WHERE id = $1")
            .bind(DEFAULT_RANK_ID)
            .fetch_optional(&mut *tx)
            .await?;

        if rank.is_none() {
            return Err(AppError::internal(
                "Default member rank is missing",
                json!({ "rank_id": DEFAULT_RANK_ID }),
            ));
        }

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO members (email, password_hash, nickname, rank_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_member.email)
        .bind(&new_member.password_hash)
        .bind(&new_member.nickname)
        .bind(DEFAULT_RANK_ID)
        .fetch_one(&mut *tx)
        .await?;

        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members m JOIN member_ranks r ON r.id = m.rank_id WHERE m.id = $1"
        );
        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Member::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, AppError> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members m JOIN member_ranks r ON r.id = m.rank_id WHERE m.id = $1"
        );

        let row = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        self.find_one("m.email = $1", email).await
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<MemberCredentials>, AppError> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT id, password_hash, status
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|r| {
            Ok(MemberCredentials {
                member_id: r.id,
                password_hash: r.password_hash,
                status: r.status.parse()?,
            })
        })
        .transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM members WHERE email = $1)")
                .bind(email)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM members WHERE nickname = $1)")
                .bind(nickname)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn set_role(&self, id: i64, role: MemberRole) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Member not found",
                json!({ "member_id": id }),
            ));
        }

        Ok(())
    }

    async fn list_career_posts(&self, member_id: i64) -> Result<Vec<PostSummary>, AppError> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            r#"
            SELECT id, title, created_at
            FROM career_posts
            WHERE member_id = $1 AND visible
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| PostSummary {
                id: r.id,
                title: r.title,
                created_at: r.created_at,
            })
            .collect())
    }
}

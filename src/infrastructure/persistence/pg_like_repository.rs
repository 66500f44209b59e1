//! PostgreSQL implementation of like repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Like, LikeTarget, LikeablePost};
use crate::domain::repositories::LikeRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LikeRow {
    id: i64,
    member_id: i64,
    post_id: i64,
    created_at: DateTime<Utc>,
}

/// PostgreSQL repository for likes.
///
/// Recording a like also bumps the post's `like_count` and the author's
/// points and rank in the same transaction.
pub struct PgLikeRepository {
    pool: Arc<PgPool>,
}

impl PgLikeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn find_likeable(
        &self,
        target: LikeTarget,
        post_id: i64,
    ) -> Result<Option<LikeablePost>, AppError> {
        let sql = format!(
            "SELECT member_id, visible FROM {} WHERE id = $1",
            target.posts_table()
        );

        let row: Option<(i64, bool)> = sqlx::query_as(&sql)
            .bind(post_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|(author_id, visible)| LikeablePost { author_id, visible }))
    }

    async fn exists(
        &self,
        member_id: i64,
        target: LikeTarget,
        post_id: i64,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE member_id = $1 AND target = $2 AND post_id = $3
            )
            "#,
        )
        .bind(member_id)
        .bind(target.as_str())
        .bind(post_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn create(
        &self,
        member_id: i64,
        target: LikeTarget,
        post_id: i64,
        author_id: i64,
        points: i32,
    ) -> Result<Like, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, LikeRow>(
            r#"
            INSERT INTO likes (member_id, target, post_id)
            VALUES ($1, $2, $3)
            RETURNING id, member_id, post_id, created_at
            "#,
        )
        .bind(member_id)
        .bind(target.as_str())
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        let bump = format!(
            "UPDATE {} SET like_count = like_count + 1 WHERE id = $1",
            target.posts_table()
        );
        sqlx::query(&bump).bind(post_id).execute(&mut *tx).await?;

        sqlx::query(
            r#"
            UPDATE members
            SET point = point + $2,
                rank_id = COALESCE(
                    (SELECT id FROM member_ranks
                     WHERE min_point <= members.point + $2
                     ORDER BY min_point DESC
                     LIMIT 1),
                    rank_id
                ),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(author_id)
        .bind(points)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Like {
            id: row.id,
            member_id: row.member_id,
            target,
            post_id: row.post_id,
            created_at: row.created_at,
        })
    }
}

#![allow(dead_code)]

use algo_community::api::routes;
use algo_community::domain::entities::DEFAULT_MAX_IMAGE_BYTES;
use algo_community::infrastructure::cache::NullCache;
use algo_community::infrastructure::feedback::DisabledFeedbackClient;
use algo_community::infrastructure::storage::NullStorage;
use algo_community::state::{AppState, StateSettings};
use algo_community::utils::token::hash_token;
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(NullCache::new()),
        Arc::new(NullStorage::new()),
        Arc::new(DisabledFeedbackClient),
        StateSettings {
            token_signing_secret: TEST_SIGNING_SECRET.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        },
    )
}

/// Full API router with authentication but without rate limiting.
pub fn create_test_app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::public_routes())
        .merge(routes::protected(
            routes::member_routes(DEFAULT_MAX_IMAGE_BYTES),
            &state,
        ))
        .nest(
            "/admin",
            routes::admin_only(routes::admin_routes(DEFAULT_MAX_IMAGE_BYTES), &state),
        );

    Router::new().nest("/api", api).with_state(state)
}

/// Inserts a member with an unusable password hash and returns its id.
pub async fn create_test_member(pool: &PgPool, nickname: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO members (email, password_hash, nickname, rank_id)
         VALUES ($1, 'not-a-bcrypt-hash', $2, 1) RETURNING id",
    )
    .bind(format!("{}@example.com", nickname))
    .bind(nickname)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_admin(pool: &PgPool, nickname: &str) -> i64 {
    let id = create_test_member(pool, nickname).await;
    sqlx::query("UPDATE members SET role = 'ADMIN' WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    id
}

/// Stores an access token for the member and returns the raw token.
pub async fn create_test_token(pool: &PgPool, member_id: i64) -> String {
    let token = format!("test-token-{}", member_id);
    sqlx::query("INSERT INTO member_tokens (member_id, name, token_hash) VALUES ($1, 'test', $2)")
        .bind(member_id)
        .bind(hash_token(TEST_SIGNING_SECRET, &token))
        .execute(pool)
        .await
        .unwrap();
    token
}

/// Creates a member with a token and returns `(member_id, token)`.
pub async fn create_logged_in_member(pool: &PgPool, nickname: &str) -> (i64, String) {
    let id = create_test_member(pool, nickname).await;
    let token = create_test_token(pool, id).await;
    (id, token)
}

pub async fn create_logged_in_admin(pool: &PgPool, nickname: &str) -> (i64, String) {
    let id = create_test_admin(pool, nickname).await;
    let token = create_test_token(pool, id).await;
    (id, token)
}

pub async fn create_test_roadmap(pool: &PgPool, title: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO algo_roadmaps (title) VALUES ($1) RETURNING id")
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a visible algo post and bumps the roadmap counter.
pub async fn create_test_algo_post(pool: &PgPool, roadmap_id: i64, admin_id: i64) -> i64 {
    let id = sqlx::query_scalar(
        "INSERT INTO algo_posts (roadmap_id, member_id, title, content)
         VALUES ($1, $2, 'Binary search', 'Halve the range') RETURNING id",
    )
    .bind(roadmap_id)
    .bind(admin_id)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("UPDATE algo_roadmaps SET post_count = post_count + 1 WHERE id = $1")
        .bind(roadmap_id)
        .execute(pool)
        .await
        .unwrap();

    id
}

/// Inserts a question with options; the option at `correct` is the right answer.
/// Returns `(question_id, option_ids)`.
pub async fn create_test_quiz(
    pool: &PgPool,
    post_id: i64,
    options: &[&str],
    correct: usize,
) -> (i64, Vec<i64>) {
    let question_id: i64 = sqlx::query_scalar(
        "INSERT INTO algo_quiz_questions (post_id, question) VALUES ($1, 'Complexity?') RETURNING id",
    )
    .bind(post_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let mut option_ids = Vec::with_capacity(options.len());
    for (position, content) in options.iter().enumerate() {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO algo_quiz_options (question_id, content, is_correct, position)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(question_id)
        .bind(*content)
        .bind(position == correct)
        .bind(position as i32)
        .fetch_one(pool)
        .await
        .unwrap();
        option_ids.push(id);
    }

    (question_id, option_ids)
}

pub async fn create_test_problem(pool: &PgPool, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO coding_problems (title, content, platform, difficulty)
         VALUES ($1, 'Find two numbers', 'BAEKJOON', 'SILVER') RETURNING id",
    )
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a visible coding post and bumps the problem counter.
pub async fn create_test_coding_post(pool: &PgPool, problem_id: i64, member_id: i64) -> i64 {
    let id = sqlx::query_scalar(
        "INSERT INTO coding_posts (member_id, problem_id, title, content)
         VALUES ($1, $2, 'Two pointers', 'fn main() {}') RETURNING id",
    )
    .bind(member_id)
    .bind(problem_id)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("UPDATE coding_problems SET post_count = post_count + 1 WHERE id = $1")
        .bind(problem_id)
        .execute(pool)
        .await
        .unwrap();

    id
}

/// Inserts an open recruitment post expiring in a week.
pub async fn create_test_recruit_post(pool: &PgPool, member_id: i64, capacity: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO study_recruit_posts
             (member_id, title, content, start_date, end_date, expires_at, capacity)
         VALUES ($1, 'Graph study', 'Weekly', CURRENT_DATE + 7, CURRENT_DATE + 60,
                 NOW() + INTERVAL '7 days', $2)
         RETURNING id",
    )
    .bind(member_id)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_career_post(pool: &PgPool, member_id: i64, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO career_posts (member_id, title, content) VALUES ($1, $2, 'Interview notes') RETURNING id",
    )
    .bind(member_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn member_point(pool: &PgPool, member_id: i64) -> (i32, i64) {
    sqlx::query_as("SELECT point, rank_id FROM members WHERE id = $1")
        .bind(member_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_admin_creates_problem(pool: PgPool) {
    let (_, admin) = common::create_logged_in_admin(&pool, "admin").await;
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let payload = json!({
        "title": "Two Sum",
        "content": "Find two numbers adding up to target",
        "platform": "LEETCODE",
        "difficulty": "EASY"
    });

    server
        .post("/api/admin/coding/problems")
        .authorization_bearer(&member)
        .json(&payload)
        .await
        .assert_status_forbidden();

    let created = server
        .post("/api/admin/coding/problems")
        .authorization_bearer(&admin)
        .json(&payload)
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let problem = server
        .get(&format!("/api/coding/problems/{}", id))
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(problem["title"], "Two Sum");
    assert_eq!(problem["post_count"], 0);
}

#[sqlx::test]
async fn test_create_post_without_feedback_service(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let form = MultipartForm::new()
        .add_text("problem_id", problem_id.to_string())
        .add_text("title", "Hash map solution")
        .add_text("content", "fn two_sum() {}");
    let created = server
        .post("/api/coding/posts")
        .authorization_bearer(&member)
        .multipart(form)
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let post = server
        .get(&format!("/api/coding/posts/{}", id))
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(post["title"], "Hash map solution");
    assert!(post["ai_big_o"].is_null());
    assert_eq!(post["images"], json!([]));

    let problem = server
        .get(&format!("/api/coding/problems/{}", problem_id))
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(problem["post_count"], 1);
}

#[sqlx::test]
async fn test_create_post_skips_empty_file_part(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let form = MultipartForm::new()
        .add_text("problem_id", problem_id.to_string())
        .add_text("title", "No attachment")
        .add_text("content", "fn two_sum() {}")
        .add_part(
            "images",
            Part::bytes(Vec::new())
                .file_name("unused.png")
                .mime_type("image/png"),
        );

    let created = server
        .post("/api/coding/posts")
        .authorization_bearer(&member)
        .multipart(form)
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let post = server
        .get(&format!("/api/coding/posts/{}", id))
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(post["images"], json!([]));
}

#[sqlx::test]
async fn test_create_post_requires_problem_id(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let form = MultipartForm::new()
        .add_text("title", "Orphan")
        .add_text("content", "No problem");

    server
        .post("/api/coding/posts")
        .authorization_bearer(&member)
        .multipart(form)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_list_posts_filters_by_problem(pool: PgPool) {
    let (member_id, member) = common::create_logged_in_member(&pool, "alice").await;
    let first = common::create_test_problem(&pool, "Two Sum").await;
    let second = common::create_test_problem(&pool, "Three Sum").await;
    common::create_test_coding_post(&pool, first, member_id).await;
    common::create_test_coding_post(&pool, second, member_id).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let all = server
        .get("/api/coding/posts")
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let filtered = server
        .get("/api/coding/posts")
        .add_query_param("problem_id", first)
        .authorization_bearer(&member)
        .await
        .json::<serde_json::Value>();
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["problem_id"], first);
    assert_eq!(filtered[0]["member_nickname"], "alice");
}

#[sqlx::test]
async fn test_only_author_updates_post(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, other) = common::create_logged_in_member(&pool, "bob").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let post_id = common::create_test_coding_post(&pool, problem_id, author_id).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let payload = json!({ "title": "Sorted two pointers", "content": "O(n log n)" });

    server
        .put(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&other)
        .json(&payload)
        .await
        .assert_status_forbidden();

    let updated = server
        .put(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&author)
        .json(&payload)
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<serde_json::Value>()["title"], "Sorted two pointers");
}

#[sqlx::test]
async fn test_delete_post(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, other) = common::create_logged_in_member(&pool, "bob").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let post_id = common::create_test_coding_post(&pool, problem_id, author_id).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .delete(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&other)
        .await
        .assert_status_forbidden();

    server
        .delete(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&author)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&author)
        .await
        .assert_status_not_found();

    let problem = server
        .get(&format!("/api/coding/problems/{}", problem_id))
        .authorization_bearer(&author)
        .await
        .json::<serde_json::Value>();
    assert_eq!(problem["post_count"], 0);
}

#[sqlx::test]
async fn test_image_upload_disabled_without_storage(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let post_id = common::create_test_coding_post(&pool, problem_id, author_id).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let form = MultipartForm::new().add_part(
        "images",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("trace.jpg")
            .mime_type("image/jpeg"),
    );

    let response = server
        .post(&format!("/api/coding/posts/{}/images", post_id))
        .authorization_bearer(&author)
        .multipart(form)
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_like_and_comment_on_post(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, reader) = common::create_logged_in_member(&pool, "bob").await;
    let problem_id = common::create_test_problem(&pool, "Two Sum").await;
    let post_id = common::create_test_coding_post(&pool, problem_id, author_id).await;
    let app = common::create_test_app(common::create_test_state(pool.clone()));
    let server = TestServer::new(app).unwrap();

    server
        .post(&format!("/api/coding/posts/{}/likes", post_id))
        .authorization_bearer(&author)
        .await
        .assert_status_bad_request();

    let like = server
        .post(&format!("/api/coding/posts/{}/likes", post_id))
        .authorization_bearer(&reader)
        .await;
    like.assert_status(StatusCode::CREATED);
    assert_eq!(like.json::<serde_json::Value>()["target"], "CODING_POST");

    server
        .post(&format!("/api/coding/posts/{}/comments", post_id))
        .authorization_bearer(&reader)
        .json(&json!({ "content": "Nice use of a map" }))
        .await
        .assert_status(StatusCode::CREATED);

    let post = server
        .get(&format!("/api/coding/posts/{}", post_id))
        .authorization_bearer(&reader)
        .await
        .json::<serde_json::Value>();
    assert_eq!(post["like_count"], 1);
    assert_eq!(post["comment_count"], 1);

    let (point, _) = common::member_point(&pool, author_id).await;
    assert_eq!(point, 1);
}

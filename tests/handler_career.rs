mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_and_list_career_posts(pool: PgPool) {
    let (member_id, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let created = server
        .post("/api/career/posts")
        .authorization_bearer(&member)
        .json(&json!({ "title": "Onsite interview", "content": "Two graph questions" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["member_id"], member_id);
    assert_eq!(body["member_nickname"], "alice");
    let post_id = body["id"].as_i64().unwrap();

    let listed = server
        .get("/api/career/posts")
        .authorization_bearer(&member)
        .await
        .json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let detail = server
        .get(&format!("/api/career/posts/{}", post_id))
        .authorization_bearer(&member)
        .await
        .json::<Value>();
    assert_eq!(detail["content"], "Two graph questions");
}

#[sqlx::test]
async fn test_create_career_post_validation(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/career/posts")
        .authorization_bearer(&member)
        .json(&json!({ "title": "", "content": "No title" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_delete_career_post(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, other) = common::create_logged_in_member(&pool, "bob").await;
    let (_, admin) = common::create_logged_in_admin(&pool, "admin").await;
    let first = common::create_test_career_post(&pool, author_id, "Resume tips").await;
    let second = common::create_test_career_post(&pool, author_id, "Offer negotiation").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .delete(&format!("/api/career/posts/{}", first))
        .authorization_bearer(&other)
        .await
        .assert_status_forbidden();

    server
        .delete(&format!("/api/career/posts/{}", first))
        .authorization_bearer(&author)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete(&format!("/api/career/posts/{}", first))
        .authorization_bearer(&author)
        .await
        .assert_status_bad_request();

    server
        .delete(&format!("/api/career/posts/{}", second))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/career/posts/{}", second))
        .authorization_bearer(&author)
        .await
        .assert_status_not_found();

    server
        .delete("/api/career/posts/999999")
        .authorization_bearer(&author)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_member_career_posts(pool: PgPool) {
    let (alice_id, alice) = common::create_logged_in_member(&pool, "alice").await;
    let bob_id = common::create_test_member(&pool, "bob").await;
    common::create_test_career_post(&pool, alice_id, "First job").await;
    common::create_test_career_post(&pool, alice_id, "Second job").await;
    common::create_test_career_post(&pool, bob_id, "Bob's story").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let mine = server
        .get("/api/members/me/career-posts")
        .authorization_bearer(&alice)
        .await
        .json::<Value>();
    assert_eq!(mine.as_array().unwrap().len(), 2);

    let bobs = server
        .get(&format!("/api/members/{}/career-posts", bob_id))
        .authorization_bearer(&alice)
        .await
        .json::<Value>();
    assert_eq!(bobs.as_array().unwrap().len(), 1);
    assert_eq!(bobs[0]["title"], "Bob's story");
}

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;

fn recruit_payload(capacity: i32) -> Value {
    let today = Utc::now().date_naive();
    json!({
        "title": "Dynamic programming study",
        "content": "Two problems a week",
        "start_date": today + Duration::days(14),
        "end_date": today + Duration::days(60),
        "expires_at": Utc::now() + Duration::days(7),
        "capacity": capacity
    })
}

#[sqlx::test]
async fn test_create_and_view_recruitment(pool: PgPool) {
    let (member_id, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let created = server
        .post("/api/study-recruit/posts")
        .authorization_bearer(&member)
        .json(&recruit_payload(4))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(body["status"], "OPEN");
    assert_eq!(body["member_id"], member_id);
    let id = body["id"].as_i64().unwrap();

    let detail = server
        .get(&format!("/api/study-recruit/posts/{}", id))
        .authorization_bearer(&member)
        .await
        .json::<Value>();
    assert_eq!(detail["member_nickname"], "alice");
    assert_eq!(detail["rank_name"], "Bronze");
    assert_eq!(detail["participant_count"], 0);

    let page = server
        .get("/api/study-recruit/posts")
        .add_query_param("page", 1)
        .authorization_bearer(&member)
        .await
        .json::<Value>();
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_create_recruitment_validation(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .post("/api/study-recruit/posts")
        .authorization_bearer(&member)
        .json(&recruit_payload(1))
        .await
        .assert_status_bad_request();

    let mut late_deadline = recruit_payload(4);
    late_deadline["expires_at"] = json!(Utc::now() + Duration::days(30));
    server
        .post("/api/study-recruit/posts")
        .authorization_bearer(&member)
        .json(&late_deadline)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_invalid_page_rejected(pool: PgPool) {
    let (_, member) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .get("/api/study-recruit/posts")
        .add_query_param("page", 0)
        .authorization_bearer(&member)
        .await
        .assert_status_bad_request();
}

#[sqlx::test]
async fn test_only_author_edits_post(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, other) = common::create_logged_in_member(&pool, "bob").await;
    let post_id = common::create_test_recruit_post(&pool, author_id, 4).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .put(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&other)
        .json(&recruit_payload(6))
        .await
        .assert_status_bad_request();

    let updated = server
        .put(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&author)
        .json(&recruit_payload(6))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["capacity"], 6);

    server
        .delete(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&author)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&author)
        .await
        .assert_status_not_found();
}

#[sqlx::test]
async fn test_application_flow(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, bob) = common::create_logged_in_member(&pool, "bob").await;
    let (_, carol) = common::create_logged_in_member(&pool, "carol").await;
    let (_, dave) = common::create_logged_in_member(&pool, "dave").await;
    let post_id = common::create_test_recruit_post(&pool, author_id, 2).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();
    let applicants_url = format!("/api/study-recruit/posts/{}/applicants", post_id);

    server
        .post(&applicants_url)
        .authorization_bearer(&author)
        .await
        .assert_status_bad_request();

    let applied = server.post(&applicants_url).authorization_bearer(&bob).await;
    applied.assert_status(StatusCode::CREATED);
    let bob_application = applied.json::<Value>();
    assert_eq!(bob_application["status"], "PENDING");
    let bob_applicant_id = bob_application["id"].as_i64().unwrap();

    server
        .post(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::CONFLICT);

    let carol_applicant_id = server
        .post(&applicants_url)
        .authorization_bearer(&carol)
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    server
        .get(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status_forbidden();

    let listed = server
        .get(&applicants_url)
        .authorization_bearer(&author)
        .await
        .json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let approved = server
        .patch(&format!("{}/{}", applicants_url, bob_applicant_id))
        .authorization_bearer(&author)
        .json(&json!({ "approve": true }))
        .await;
    approved.assert_status_ok();
    assert_eq!(approved.json::<Value>()["status"], "APPROVED");

    server
        .patch(&format!("{}/{}", applicants_url, bob_applicant_id))
        .authorization_bearer(&author)
        .json(&json!({ "approve": false }))
        .await
        .assert_status_bad_request();

    server
        .patch(&format!("{}/{}", applicants_url, carol_applicant_id))
        .authorization_bearer(&author)
        .json(&json!({ "approve": true }))
        .await
        .assert_status_ok();

    server
        .post(&applicants_url)
        .authorization_bearer(&dave)
        .await
        .assert_status_bad_request();

    server
        .delete(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status_bad_request();

    let detail = server
        .get(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&author)
        .await
        .json::<Value>();
    assert_eq!(detail["participant_count"], 2);
}

#[sqlx::test]
async fn test_cancel_pending_application(pool: PgPool) {
    let (author_id, _) = common::create_logged_in_member(&pool, "alice").await;
    let (_, bob) = common::create_logged_in_member(&pool, "bob").await;
    let post_id = common::create_test_recruit_post(&pool, author_id, 4).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();
    let applicants_url = format!("/api/study-recruit/posts/{}/applicants", post_id);

    server
        .delete(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status_not_found();

    server
        .post(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::CREATED);

    server
        .delete(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .post(&applicants_url)
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::CREATED);
}

#[sqlx::test]
async fn test_close_recruitment(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, bob) = common::create_logged_in_member(&pool, "bob").await;
    let post_id = common::create_test_recruit_post(&pool, author_id, 4).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();
    let close_url = format!("/api/study-recruit/posts/{}/close", post_id);

    server
        .post(&close_url)
        .authorization_bearer(&bob)
        .await
        .assert_status_forbidden();

    server
        .post(&close_url)
        .authorization_bearer(&author)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .post(&close_url)
        .authorization_bearer(&author)
        .await
        .assert_status_bad_request();

    server
        .post(&format!("/api/study-recruit/posts/{}/applicants", post_id))
        .authorization_bearer(&bob)
        .await
        .assert_status_bad_request();

    let detail = server
        .get(&format!("/api/study-recruit/posts/{}", post_id))
        .authorization_bearer(&bob)
        .await
        .json::<Value>();
    assert_eq!(detail["status"], "CLOSED");
}

#[sqlx::test]
async fn test_recruit_comments(pool: PgPool) {
    let (author_id, author) = common::create_logged_in_member(&pool, "alice").await;
    let (_, admin) = common::create_logged_in_admin(&pool, "admin").await;
    let post_id = common::create_test_recruit_post(&pool, author_id, 4).await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let comment = server
        .post(&format!("/api/study-recruit/posts/{}/comments", post_id))
        .authorization_bearer(&author)
        .json(&json!({ "content": "Meeting on Discord" }))
        .await;
    comment.assert_status(StatusCode::CREATED);
    let comment_id = comment.json::<Value>()["id"].as_i64().unwrap();

    let updated = server
        .put(&format!("/api/study-recruit/comments/{}", comment_id))
        .authorization_bearer(&author)
        .json(&json!({ "content": "Meeting on Zoom" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["content"], "Meeting on Zoom");

    server
        .delete(&format!("/api/admin/study-recruit/comments/{}", comment_id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let comments = server
        .get(&format!("/api/study-recruit/posts/{}/comments", post_id))
        .authorization_bearer(&author)
        .await
        .json::<Value>();
    assert_eq!(comments, json!([]));
}

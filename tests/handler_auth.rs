mod common;

use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_register_success(pool: PgPool) {
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "Alice@Example.com",
            "password": "correct-horse",
            "nickname": "alice"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["email"], "alice@example.com");
    assert_eq!(json["nickname"], "alice");
    assert_eq!(json["role"], "USER");
    assert_eq!(json["rank_name"], "Bronze");
    assert_eq!(json["point"], 0);
    assert!(json.get("password").is_none());
}

#[sqlx::test]
async fn test_register_validation(pool: PgPool) {
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "password": "short",
            "nickname": "a!"
        }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_register_duplicate_nickname(pool: PgPool) {
    common::create_test_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "other@example.com",
            "password": "correct-horse",
            "nickname": "alice"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_login_and_logout(pool: PgPool) {
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "correct-horse",
            "nickname": "alice"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "correct-horse" }))
        .await;

    login.assert_status_ok();
    let json = login.json::<serde_json::Value>();
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["member"]["nickname"], "alice");
    let token = json["token"].as_str().unwrap().to_string();

    server
        .get("/api/members/me")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    server
        .post("/api/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .get("/api/members/me")
        .authorization_bearer(&token)
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "correct-horse",
            "nickname": "alice"
        }))
        .await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "battery-staple" }))
        .await;

    response.assert_status_unauthorized();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Invalid email or password");
}

#[sqlx::test]
async fn test_protected_route_requires_token(pool: PgPool) {
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    server.get("/api/members/me").await.assert_status_unauthorized();

    server
        .get("/api/members/me")
        .authorization_bearer("unknown-token")
        .await
        .assert_status_unauthorized();
}

#[sqlx::test]
async fn test_admin_route_rejects_member(pool: PgPool) {
    let (_, token) = common::create_logged_in_member(&pool, "alice").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/admin/algo/roadmaps")
        .authorization_bearer(&token)
        .json(&json!({ "title": "Graphs", "description": "", "order": 1 }))
        .await;

    response.assert_status_forbidden();
}

#[sqlx::test]
async fn test_member_profile(pool: PgPool) {
    let (alice, token) = common::create_logged_in_member(&pool, "alice").await;
    let bob = common::create_test_member(&pool, "bob").await;
    let app = common::create_test_app(common::create_test_state(pool));
    let server = TestServer::new(app).unwrap();

    let me = server
        .get("/api/members/me")
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(me["id"], alice);

    let other = server
        .get(&format!("/api/members/{}", bob))
        .authorization_bearer(&token)
        .await
        .json::<serde_json::Value>();
    assert_eq!(other["nickname"], "bob");

    server
        .get("/api/members/999999")
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

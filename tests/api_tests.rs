// tests/api_tests.rs

mod common;

use common::{cookie, spawn_app, spawn_offline_app, spawn_offline_as};
use serde_json::{Value, json};

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();

    for (method, path) in [
        (reqwest::Method::GET, "/api/movies"),
        (reqwest::Method::POST, "/api/movies"),
        (reqwest::Method::POST, "/api/movies/watch/1"),
        (reqwest::Method::PUT, "/api/profile"),
        (reqwest::Method::GET, "/api/favorites"),
    ] {
        let response = client
            .request(method.clone(), format!("{}{}", address, path))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 401, "{method} {path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn malformed_session_cookie_is_rejected() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/movies", address))
        .header("Cookie", cookie("not-a-uuid"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn logout_only_accepts_post() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();
    let url = format!(
        "{}/api/auth/logout/7d0c5bd4-2a4e-4c57-9a59-3e4e3c3b8f10",
        address
    );

    for response in [
        client.get(&url).send().await.unwrap(),
        client.put(&url).send().await.unwrap(),
        client.delete(&url).send().await.unwrap(),
    ] {
        assert_eq!(response.status().as_u16(), 405);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Method not allowed");
    }
}

#[tokio::test]
async fn wrong_method_answers_with_a_message() {
    let address = spawn_offline_as("admin", 1).await;
    let client = reqwest::Client::new();

    for (method, path) in [
        (reqwest::Method::GET, "/api/movies/watch/1"),
        (reqwest::Method::PATCH, "/api/profile"),
        (reqwest::Method::POST, "/api/movies/5"),
        (reqwest::Method::PUT, "/api/favorites"),
    ] {
        let response = client
            .request(method.clone(), format!("{}{}", address, path))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 405, "{method} {path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Method not allowed");
    }
}

#[tokio::test]
async fn public_routes_reject_wrong_method_with_a_message() {
    let address = spawn_offline_app().await;

    let response = reqwest::get(format!("{}/api/auth/register", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 405);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn logout_without_session_id_is_bad_request() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();

    for path in ["/api/auth/logout", "/api/auth/logout/", "/api/auth/logout/%20%20"] {
        let response = client
            .post(format!("{}{}", address, path))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Session id cannot be empty");
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let address = spawn_offline_app().await;

    let response = reqwest::get(format!("{}/api-docs/openapi.json", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let doc: Value = response.json().await.unwrap();
    assert!(doc["paths"]["/api/movies"].is_object());
    assert!(doc["paths"]["/api/profile"]["put"].is_object());
}

#[tokio::test]
async fn register_rejects_short_password() {
    let address = spawn_offline_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&json!({ "email": "ana@example.com", "password": "short" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn zero_user_id_counts_as_unauthenticated() {
    let address = spawn_offline_as("admin", 0).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/movies/watch/1", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn register_login_logout_flow() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let email = format!("{}@example.com", common::unique("reg"));

    let response = client
        .post(app.url("/api/auth/register"))
        .json(&json!({ "email": email, "password": common::PASSWORD, "name": "Ana" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Same email again
    let response = client
        .post(app.url("/api/auth/register"))
        .json(&json!({ "email": email.to_uppercase(), "password": common::PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let session_id = app.login(&client, &email).await;

    let response = client
        .get(app.url("/api/profile"))
        .header("Cookie", cookie(&session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["email"], email);
    assert!(profile.get("password").is_none());

    let response = client
        .post(app.url(&format!("/api/auth/logout/{}", session_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session_id=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // The session is gone for good
    let response = client
        .get(app.url("/api/profile"))
        .header("Cookie", cookie(&session_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .post(app.url(&format!("/api/auth/logout/{}", session_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No session with this id was found");
}

#[tokio::test]
async fn password_reset_flow() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let email = app.create_user(false).await;
    let old_session = app.login(&client, &email).await;

    let response = client
        .post(app.url("/api/auth/forgot-password"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Delivery is out of band; read the code the way a mailer would.
    let code: i32 = sqlx::query_scalar(
        "SELECT code FROM codes WHERE user_email = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(&email)
    .fetch_one(&app.pool)
    .await
    .unwrap();

    let response = client
        .post(app.url("/api/auth/verify-code"))
        .json(&json!({ "email": email, "code": code }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let response = client
        .post(app.url("/api/auth/reset-password"))
        .json(&json!({ "token": token, "password": "a-brand-new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Old sessions are ended and the token is spent
    let response = client
        .get(app.url("/api/profile"))
        .header("Cookie", cookie(&old_session))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .post(app.url("/api/auth/reset-password"))
        .json(&json!({ "token": token, "password": "yet-another-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "email": email, "password": "a-brand-new-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

async fn latest_code(app: &common::TestApp, email: &str) -> i32 {
    sqlx::query_scalar("SELECT code FROM codes WHERE user_email = $1 ORDER BY id DESC LIMIT 1")
        .bind(email)
        .fetch_one(&app.pool)
        .await
        .unwrap()
}

async fn verify(client: &reqwest::Client, app: &common::TestApp, email: &str, code: i32) -> u16 {
    client
        .post(app.url("/api/auth/verify-code"))
        .json(&json!({ "email": email, "code": code }))
        .send()
        .await
        .unwrap()
        .status()
        .as_u16()
}

async fn request_code(client: &reqwest::Client, app: &common::TestApp, email: &str) -> i32 {
    let response = client
        .post(app.url("/api/auth/forgot-password"))
        .json(&json!({ "email": email }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    latest_code(app, email).await
}

#[tokio::test]
async fn newer_code_replaces_older_one() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let email = app.create_user(false).await;

    let first = request_code(&client, &app, &email).await;
    let second = request_code(&client, &app, &email).await;

    let live: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM codes WHERE user_email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(live, 1);

    if first != second {
        assert_eq!(verify(&client, &app, &email, first).await, 400);
    }
    assert_eq!(verify(&client, &app, &email, second).await, 200);
}

#[tokio::test]
async fn code_stops_matching_after_too_many_wrong_guesses() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let email = app.create_user(false).await;

    let code = request_code(&client, &app, &email).await;
    let wrong = if code == 100_000 { 100_001 } else { 100_000 };

    for _ in 0..movie_catalog::handlers::auth::MAX_CODE_ATTEMPTS {
        assert_eq!(verify(&client, &app, &email, wrong).await, 400);
    }
    // The right code is no longer accepted
    assert_eq!(verify(&client, &app, &email, code).await, 400);

    // A fresh code works again
    let code = request_code(&client, &app, &email).await;
    assert_eq!(verify(&client, &app, &email, code).await, 200);
}

#[tokio::test]
async fn expired_codes_are_cleaned_up() {
    let Some(app) = spawn_app().await else { return };
    let email = format!("{}@example.com", common::unique("expired"));

    sqlx::query(
        "INSERT INTO codes (user_email, code, expires_at) VALUES ($1, 123456, NOW() - INTERVAL '1 minute')",
    )
    .bind(&email)
    .execute(&app.pool)
    .await
    .unwrap();

    let removed = movie_catalog::repositories::CodeRepo::cleanup_expired(&app.pool)
        .await
        .unwrap();
    assert!(removed >= 1);

    let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM codes WHERE user_email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(left, 0);
}

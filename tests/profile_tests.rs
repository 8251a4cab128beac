// tests/profile_tests.rs

mod common;

use common::{cookie, spawn_app, spawn_offline_as};
use serde_json::{Value, json};

#[tokio::test]
async fn long_name_is_rejected() {
    let address = spawn_offline_as("user", 7).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/api/profile", address))
        .json(&json!({
            "name": "Seventeen chars!!",
            "phone": "",
            "date_of_birth": "1990-04-21"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Name is too long");
}

#[tokio::test]
async fn date_must_be_year_month_day() {
    let address = spawn_offline_as("user", 7).await;
    let client = reqwest::Client::new();

    for date in ["21-04-1990", "1990-4-21", "1990-02-30", ""] {
        let response = client
            .put(format!("{}/api/profile", address))
            .json(&json!({ "name": "Ana", "phone": "", "date_of_birth": date }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "{date}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["message"],
            "Invalid date, please use format `YYYY-MM-DD`"
        );
    }
}

#[tokio::test]
async fn body_that_does_not_parse_is_bad_request() {
    let address = spawn_offline_as("user", 7).await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/api/profile", address))
        .header("Content-Type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn update_profile_persists_fields() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let session = app.session(&client, false).await;

    let response = client
        .put(app.url("/api/profile"))
        .header("Cookie", cookie(&session))
        .json(&json!({
            "name": "Ana",
            "phone": "+44 20 7946 0958",
            "date_of_birth": "1990-04-21"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Profile updated");

    // A rejected update changes nothing
    let response = client
        .put(app.url("/api/profile"))
        .header("Cookie", cookie(&session))
        .json(&json!({
            "name": "A name that is far too long",
            "phone": "",
            "date_of_birth": "2000-01-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .get(app.url("/api/profile"))
        .header("Cookie", cookie(&session))
        .send()
        .await
        .unwrap();
    let profile: Value = response.json().await.unwrap();
    assert_eq!(profile["name"], "Ana");
    assert_eq!(profile["phone"], "+44 20 7946 0958");
    assert_eq!(profile["date_of_birth"], "1990-04-21");
}

#[tokio::test]
async fn deleted_account_loses_its_sessions() {
    let Some(app) = spawn_app().await else { return };
    let client = reqwest::Client::new();
    let email = app.create_user(false).await;
    let session = app.login(&client, &email).await;

    let response = client
        .delete(app.url("/api/profile"))
        .header("Cookie", cookie(&session))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(app.url("/api/profile"))
        .header("Cookie", cookie(&session))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "email": email, "password": common::PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

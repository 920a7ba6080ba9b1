mod common;

use appointment_booking::domain::services::defaults::{DEMO_CLIENT_EMAIL, DEMO_PROFESSIONAL_EMAIL};
use appointment_booking::domain::ports::KeyValueStore;
use appointment_booking::infra::repositories::{BOOKINGS_KEY, BOOKINGS_SEQ_KEY, USERS_KEY, USERS_SEQ_KEY};
use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn book(app: &TestApp, cookie: &str, time: &str) -> common::TestResponse {
    app.request("POST", "/api/v1/bookings", Some(cookie), Some(json!({
        "professionalId": 2, "date": "2099-09-14", "time": time
    }))).await
}

#[tokio::test]
async fn test_data_survives_reload_but_login_does_not() {
    let app = TestApp::new().await;
    let client = app.login(DEMO_CLIENT_EMAIL, "client").await;
    assert_eq!(book(&app, &client, "08:00").await.status, StatusCode::CREATED);

    let pro = app.login(DEMO_PROFESSIONAL_EMAIL, "professional").await;
    let res = app.request("PUT", "/api/v1/me/availability", Some(&pro), Some(json!({
        "startTime": "08:00", "endTime": "10:00", "interval": 20
    }))).await;
    assert_eq!(res.status, StatusCode::OK);

    let app = app.reopen().await;

    // Session state lives in process memory only.
    let me = app.request("GET", "/api/v1/auth/me", Some(&client), None).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let client = app.login(DEMO_CLIENT_EMAIL, "client").await;
    let mine = app.request("GET", "/api/v1/me/bookings", Some(&client), None).await;
    assert_eq!(mine.body.as_array().unwrap().len(), 1);
    assert_eq!(mine.body[0]["time"], "08:00");

    let availability = app.request("GET", "/api/v1/professionals/2/availability", None, None).await;
    assert_eq!(availability.body["interval"], 20);
}

#[tokio::test]
async fn test_ids_continue_after_reload() {
    let app = TestApp::new().await;
    let client = app.login(DEMO_CLIENT_EMAIL, "client").await;
    assert_eq!(book(&app, &client, "08:00").await.body["id"], 1);
    assert_eq!(book(&app, &client, "08:50").await.body["id"], 2);

    let app = app.reopen().await;
    let client = app.login(DEMO_CLIENT_EMAIL, "client").await;
    assert_eq!(book(&app, &client, "09:40").await.body["id"], 3);
    assert_eq!(app.store.get(BOOKINGS_SEQ_KEY).await.unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn test_demo_accounts_are_seeded_once() {
    let app = TestApp::new().await;
    let res = app.request("POST", "/api/v1/auth/signup", None, Some(json!({
        "name": "Vera", "email": "vera@example.com", "phone": "555-0160", "password": "123456", "type": "client"
    }))).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let app = app.reopen().await;
    let raw = app.store.get(USERS_KEY).await.unwrap().unwrap();
    let users: Vec<Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(app.store.get(USERS_SEQ_KEY).await.unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn test_counter_stays_ahead_of_existing_ids() {
    let app = TestApp::new().await;

    // Data written without a sequence, with a gap in the ids.
    let raw = app.store.get(USERS_KEY).await.unwrap().unwrap();
    let mut users: Vec<Value> = serde_json::from_str(&raw).unwrap();
    users[0]["id"] = json!(7);
    app.store.set(USERS_KEY, &serde_json::to_string(&users).unwrap()).await.unwrap();
    app.store.remove(USERS_SEQ_KEY).await.unwrap();

    let res = app.request("POST", "/api/v1/auth/signup", None, Some(json!({
        "name": "Caio", "email": "caio@example.com", "phone": "555-0170", "password": "123456", "type": "client"
    }))).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["id"], 8);
}

#[tokio::test]
async fn test_corrupt_collection_is_reported_not_reset() {
    let app = TestApp::new().await;
    app.store.set(BOOKINGS_KEY, "{not json").await.unwrap();

    let res = app.request("GET", "/api/v1/professionals/2/slots?date=2099-09-14", None, None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body["error"].is_string());

    // Reloading keeps the broken value for inspection.
    let app = app.reopen().await;
    assert_eq!(app.store.get(BOOKINGS_KEY).await.unwrap().as_deref(), Some("{not json"));
}

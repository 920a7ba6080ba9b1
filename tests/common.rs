use appointment_booking::{
    api::router::create_router,
    config::Config,
    domain::ports::KeyValueStore,
    domain::services::defaults::DEMO_PASSWORD,
    infra::factory::{build_state, connect_sqlite},
    infra::stores::sqlite_store::SqliteStore,
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn KeyValueStore>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
    pub cookie: Option<String>,
}

fn test_config(db_url: &str) -> Config {
    Config {
        database_url: db_url.to_string(),
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        base_price: 75.0,
        log_dir: "./logs".to_string(),
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::open(format!("test_{}.db", Uuid::new_v4())).await
    }

    async fn open(db_filename: String) -> Self {
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);
        let pool = connect_sqlite(&db_url).await.expect("Failed to connect to test db");

        let sqlite = SqliteStore::new(pool);
        sqlite.migrate().await.expect("Failed to migrate test db");
        let store: Arc<dyn KeyValueStore> = Arc::new(sqlite);

        let state = Arc::new(
            build_state(test_config(&db_url), store.clone()).await.expect("Failed to build state"),
        );
        let router = create_router(state.clone());

        Self { router, store, db_filename, state }
    }

    /// Same database file, fresh process state: what a page reload sees.
    pub async fn reopen(mut self) -> Self {
        let db_filename = std::mem::take(&mut self.db_filename);
        drop(self);
        Self::open(db_filename).await
    }

    pub async fn request(&self, method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let cookie = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .find(|c| c.starts_with("booking_session="))
            .map(|c| c.split(';').next().unwrap().to_string());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text, cookie }
    }

    /// Logs in with the demo password and returns the session cookie.
    pub async fn login(&self, email: &str, user_type: &str) -> String {
        let res = self.request(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": DEMO_PASSWORD, "type": user_type })),
        ).await;

        if !res.status.is_success() {
            panic!("Login failed in test helper: status {}", res.status);
        }
        res.cookie.expect("No booking_session cookie returned")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if self.db_filename.is_empty() {
            return;
        }
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

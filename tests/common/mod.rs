use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use questionnaire::config::Config;
use questionnaire::db;

/// A running test server instance backed by its own sqlite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
    pub db_path: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a questionnaire body, return (body, status).
    pub async fn submit(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-questionnaire"))
            .json(body)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit answers only and return the new id, asserting success.
    pub async fn submit_answers(&self, answers: Value) -> i64 {
        let (body, status) = self.submit(&json!({ "answers": answers })).await;
        assert_eq!(status, StatusCode::OK, "submit failed: {body}");
        body["id"].as_i64().expect("submit response carries an id")
    }

    /// Post a raw (possibly malformed) body, return (body, status).
    pub async fn post_raw(&self, path: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn update(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/update-submission"))
            .json(body)
            .send()
            .await
            .expect("update request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET a path, return (body, status).
    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn row_count(&self) -> i64 {
        db::submissions::count(&self.pool)
            .await
            .expect("count query failed")
    }
}

pub fn test_config(database_url: String) -> Config {
    Config {
        database_url,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        static_dir: None,
        max_body_size: 1_048_576,
        db_max_connections: 5,
        shutdown_grace: Duration::from_secs(1),
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|config| config).await
}

/// Like [`spawn_app`], letting the caller adjust the config first.
pub async fn spawn_app_with<F>(adjust: F) -> TestApp
where
    F: FnOnce(Config) -> Config,
{
    let db_path = std::env::temp_dir().join(format!(
        "questionnaire_test_{}.db",
        Uuid::now_v7().simple()
    ));
    let config = adjust(test_config(format!("sqlite://{}", db_path.display())));

    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to open test database");

    db::init_schema(&pool)
        .await
        .expect("Failed to create schema in test database");

    let app = questionnaire::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder().build().unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_path,
    }
}

/// Close the pool and remove the database file along with its WAL files.
pub async fn cleanup(app: TestApp) {
    app.pool.close().await;

    let path = app.db_path.display().to_string();
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path}{suffix}"));
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::{self, queries};
use trivia_api::quiz::IndexPicker;
use trivia_api::server::app::{router, AppState};

/// Always draws the same index, so quiz answers are predictable.
pub struct FixedPicker(pub usize);

impl IndexPicker for FixedPicker {
    fn pick(&self, _len: usize) -> usize {
        self.0
    }
}

pub struct TestApp {
    pub pool: SqlitePool,
    pub router: Router,
}

pub async fn empty_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    let router = router(AppState::new(pool.clone(), Arc::new(FixedPicker(0))));
    TestApp { pool, router }
}

/// Six categories and twelve questions, two per category, ids 1..=12.
pub async fn seeded_app() -> TestApp {
    let app = empty_app().await;
    for kind in [
        "Science",
        "Art",
        "Geography",
        "History",
        "Entertainment",
        "Sports",
    ] {
        queries::categories::create_category(&app.pool, kind)
            .await
            .unwrap();
    }
    for n in 0..12i64 {
        queries::questions::create_question(
            &app.pool,
            &format!("Question number {n}?"),
            &format!("Answer {n}"),
            n % 5 + 1,
            n % 6 + 1,
        )
        .await
        .unwrap();
    }
    app
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn question_count(&self) -> i64 {
        queries::questions::count_questions(&self.pool).await.unwrap()
    }

    pub async fn category_count(&self) -> usize {
        queries::categories::get_all_categories(&self.pool)
            .await
            .unwrap()
            .len()
    }
}

pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}

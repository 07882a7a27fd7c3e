mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{assert_error, seeded_app, FixedPicker, TestApp};
use trivia_api::server::app::{router, AppState};

#[tokio::test]
async fn picks_from_the_requested_category() {
    let app = seeded_app().await;
    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "Entertainment", "id": 5}, "previous_questions": []}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["category"], 5);
    assert_eq!(body["question"]["id"], 5);
}

#[tokio::test]
async fn skips_previous_questions() {
    let app = seeded_app().await;
    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "Entertainment", "id": "5"}, "previous_questions": [5]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 11);
}

#[tokio::test]
async fn exhausted_category_returns_null_question() {
    let app = seeded_app().await;
    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "Entertainment", "id": 5}, "previous_questions": [5, 11]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "question": null}));
}

#[tokio::test]
async fn click_draws_from_every_category() {
    let app = seeded_app().await;
    let all_but_last: Vec<i64> = (1..12).collect();
    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "click", "id": 0}, "previous_questions": all_but_last}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 12);
    assert_eq!(body["question"]["category"], 6);
}

#[tokio::test]
async fn injected_picker_chooses_the_index() {
    let seeded = seeded_app().await;
    let app = TestApp {
        router: router(AppState::new(seeded.pool.clone(), Arc::new(FixedPicker(1)))),
        pool: seeded.pool,
    };
    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "click"}, "previous_questions": [1]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    // candidates are ordered by id: 2, 3, ...
    assert_eq!(body["question"]["id"], 3);
}

#[tokio::test]
async fn missing_fields_are_unprocessable() {
    let app = seeded_app().await;
    for body in [
        json!({"previous_questions": []}),
        json!({"quiz_category": {"type": "Science", "id": 1}}),
        json!({"quiz_category": {"type": "Science"}, "previous_questions": []}),
        json!({"quiz_category": {"id": 1}, "previous_questions": []}),
        json!({"quiz_category": {"type": "Science", "id": 1}, "previous_questions": ["x"]}),
        json!({"quiz_category": "Science", "previous_questions": []}),
    ] {
        let (status, body) = app.post("/quizzes/", body).await;
        assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
    }
}

#[tokio::test]
async fn long_previous_question_lists_are_accepted() {
    let app = seeded_app().await;
    let mut previous: Vec<i64> = (100..40_100).collect();
    previous.extend(1..12);

    let (status, body) = app
        .post(
            "/quizzes/",
            json!({"quiz_category": {"type": "click"}, "previous_questions": previous}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 12);
}

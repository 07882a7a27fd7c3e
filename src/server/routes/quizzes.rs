use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{self, IndexPicker, QuizScope},
    server::{
        app::AppState,
        deserializers::LooseId,
        error::{ApiError, Cause, ErrorKind},
    },
    telemetry::record_quiz_round,
};

use super::{read_body, required, success, ApiJson};

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
}

#[derive(Deserialize)]
struct QuizRound {
    quiz_category: Option<QuizCategory>,
    previous_questions: Option<Vec<LooseId>>,
}

#[derive(Serialize)]
struct NextQuestion {
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    State(picker): State<Arc<dyn IndexPicker>>,
    body: Result<Json<QuizRound>, JsonRejection>,
) -> ApiJson<NextQuestion> {
    let round = read_body(body, ErrorKind::Unprocessable)?;
    let category = required(round.quiz_category, "quiz_category")?;
    let previous: Vec<i64> = required(round.previous_questions, "previous_questions")?
        .into_iter()
        .map(|id| id.0)
        .collect();
    let scope = QuizScope::resolve(&category.kind, category.id)
        .ok_or_else(|| ApiError::unprocessable(Cause::MissingField("quiz_category.id")))?;

    let candidates = questions::get_quiz_candidates(&pool, scope.category(), &previous)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::debug!(
        scope = ?scope,
        seen = previous.len(),
        candidates = candidates.len(),
        "Picking quiz question"
    );

    let question = quiz::choose(candidates, picker.as_ref());
    let outcome = if question.is_some() {
        scope.label()
    } else {
        "exhausted"
    };
    record_quiz_round(outcome);

    Ok(success(NextQuestion { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes/", post(play_quiz))
        .with_state(state)
}

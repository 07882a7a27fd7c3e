use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, Cause, ErrorKind},
    },
};

use super::{categories::category_map, read_body, required, success, ApiJson, Created, ResourceId};

pub const QUESTIONS_PER_PAGE: i64 = 5;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct QuestionBody {
    question: Question,
    category: String,
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

/// `(limit, offset)` of a 1-based page, `None` for pages that cannot exist.
fn page_window(page: i64) -> Option<(i64, i64)> {
    if page < 1 {
        return None;
    }
    let offset = (page - 1).checked_mul(QUESTIONS_PER_PAGE)?;
    Some((QUESTIONS_PER_PAGE, offset))
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiJson<QuestionsPage> {
    let Query(PageQuery { page }) =
        query.map_err(|rejection| ApiError::not_found(Cause::Malformed(rejection.body_text())))?;
    let page = page.unwrap_or(1);
    let (limit, offset) = page_window(page)
        .ok_or_else(|| ApiError::not_found(Cause::NotFound(format!("page {page}"))))?;

    let total_questions = questions::count_questions(&pool)
        .await
        .map_err(ApiError::not_found)?;
    if total_questions == 0 {
        return Err(ApiError::not_found(Cause::NotFound("questions".to_owned())));
    }

    // past the last page is indistinguishable from having no data
    let page_questions = questions::get_questions_page(&pool, limit, offset)
        .await
        .map_err(ApiError::not_found)?;
    if page_questions.is_empty() {
        return Err(ApiError::not_found(Cause::NotFound(format!("page {page}"))));
    }

    let categories = categories::get_all_categories(&pool)
        .await
        .map_err(ApiError::not_found)?;

    Ok(success(QuestionsPage {
        questions: page_questions,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn question(
    State(pool): State<SqlitePool>,
    ResourceId(id): ResourceId,
) -> ApiJson<QuestionBody> {
    let question = questions::get_question_by_id(&pool, id)
        .await
        .map_err(ApiError::not_found)?;
    let category = categories::get_category(&pool, question.category)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => ApiError::not_found(Cause::NotFound(format!(
                "category {} of question {id}",
                question.category
            ))),
            err => ApiError::not_found(err),
        })?;
    Ok(success(QuestionBody {
        question,
        category: category.kind,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ResourceId(id): ResourceId,
) -> ApiJson<Deleted> {
    let deleted = questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    if deleted == 0 {
        return Err(ApiError::unprocessable(Cause::NotFound(format!(
            "question {id}"
        ))));
    }
    tracing::info!(id, "Deleted question");
    Ok(success(Deleted { deleted: id }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiJson<Created> {
    let form = read_body(body, ErrorKind::Unprocessable)?;
    let question = required(form.question, "question")?;
    let answer = required(form.answer, "answer")?;
    let difficulty = required(form.difficulty, "difficulty")?;
    let category = required(form.category, "category")?;

    let id = questions::create_question(&pool, &question, &answer, difficulty, category)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, category, "Created question");
    Ok(success(Created { created: id }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiJson<SearchResults> {
    let term = read_body(body, ErrorKind::NotFound)?
        .search_term
        .filter(|term| !term.is_empty())
        .ok_or_else(|| ApiError::not_found(Cause::MissingField("search_term")))?;

    let found = questions::search_questions(&pool, &term)
        .await
        .map_err(ApiError::not_found)?;
    Ok(success(SearchResults {
        total_questions: found.len(),
        questions: found,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions/", get(list_questions).post(create_question))
        .route("/questions/search/", post(search_questions))
        .route("/questions/{id}/", get(question).delete(delete_question))
        .with_state(state)
}

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, Question,
    },
    server::{
        app::AppState,
        error::{ApiError, Cause, ErrorKind},
    },
};

use super::{read_body, required, success, ApiJson, Created, ResourceId};

#[derive(Deserialize)]
struct NewCategory {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Serialize)]
struct CategoriesBody {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryTypeBody {
    category_type: String,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

/// `{id: type}` mapping as served to the frontend.
pub(super) fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiJson<CategoriesBody> {
    let categories = categories::get_all_categories(&pool)
        .await
        .map_err(ApiError::not_found)?;
    if categories.is_empty() {
        return Err(ApiError::not_found(Cause::NotFound("categories".to_owned())));
    }
    Ok(success(CategoriesBody {
        categories: category_map(categories),
    }))
}

async fn category(
    State(pool): State<SqlitePool>,
    ResourceId(id): ResourceId,
) -> ApiJson<CategoryTypeBody> {
    let category = categories::get_category(&pool, id)
        .await
        .map_err(ApiError::not_found)?;
    Ok(success(CategoryTypeBody {
        category_type: category.kind,
    }))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> ApiJson<Created> {
    let new_category = read_body(body, ErrorKind::Unprocessable)?;
    let kind = required(new_category.kind, "type")?;

    let id = categories::create_category(&pool, &kind)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, kind = %kind, "Created category");
    Ok(success(Created { created: id }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ResourceId(id): ResourceId,
) -> ApiJson<CategoryQuestionsBody> {
    let questions = questions::get_questions_for_category(&pool, id)
        .await
        .map_err(ApiError::not_found)?;
    Ok(success(CategoryQuestionsBody {
        total_questions: questions.len(),
        questions,
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories/", get(get_categories).post(create_category))
        .route("/categories/{id}/", get(category))
        .route("/categories/{id}/questions/", get(category_questions))
        .with_state(state)
}

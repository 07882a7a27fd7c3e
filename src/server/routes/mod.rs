mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::{questions_router, QUESTIONS_PER_PAGE};
pub use quizzes::quizzes_router;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path},
    http::request::Parts,
    Json,
};
use serde::Serialize;

use super::error::{ApiError, Cause, ErrorKind};

pub type ApiResponse<T> = Result<T, ApiError>;

/// Successful payloads are flattened next to `"success": true`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub type ApiJson<T> = ApiResponse<Json<Success<T>>>;

pub fn success<T>(body: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        body,
    })
}

#[derive(Debug, Serialize)]
struct Created {
    created: i64,
}

/// Integer id taken from the path. Anything else does not name a resource.
pub struct ResourceId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ResourceId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::not_found(Cause::Malformed(rejection.body_text())))?;
        Ok(ResourceId(id))
    }
}

fn read_body<T>(body: Result<Json<T>, JsonRejection>, kind: ErrorKind) -> ApiResponse<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(kind, Cause::Malformed(rejection.body_text())))
}

fn required<T>(value: Option<T>, field: &'static str) -> ApiResponse<T> {
    value.ok_or_else(|| ApiError::unprocessable(Cause::MissingField(field)))
}

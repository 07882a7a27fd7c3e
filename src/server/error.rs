use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sqlx::error::ErrorKind as DbErrorKind;
use thiserror::Error;

/// Error kinds visible on the wire. Every route maps all of its failures to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Unprocessable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::Unprocessable => "unprocessable",
        }
    }
}

/// What actually went wrong. Only logged, clients see the coarse [`ErrorKind`].
#[derive(Debug, Error)]
pub enum Cause {
    #[error("{0} not found")]
    NotFound(String),
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("store unreachable: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("store failure: {0}")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for Cause {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Cause::NotFound("row".to_owned()),
            sqlx::Error::Database(db) => match db.kind() {
                DbErrorKind::UniqueViolation
                | DbErrorKind::ForeignKeyViolation
                | DbErrorKind::NotNullViolation
                | DbErrorKind::CheckViolation => Cause::Constraint(db.message().to_owned()),
                _ => Cause::Store(sqlx::Error::Database(db)),
            },
            err @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed) => Cause::Connection(err),
            err => Cause::Store(err),
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {cause}", .kind.message())]
pub struct ApiError {
    pub kind: ErrorKind,
    pub cause: Cause,
}

impl ApiError {
    pub fn new(kind: ErrorKind, cause: impl Into<Cause>) -> Self {
        ApiError {
            kind,
            cause: cause.into(),
        }
    }

    pub fn bad_request(cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::BadRequest, cause)
    }

    pub fn not_found(cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::NotFound, cause)
    }

    pub fn unprocessable(cause: impl Into<Cause>) -> Self {
        Self::new(ErrorKind::Unprocessable, cause)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl From<ErrorKind> for ErrorBody {
    fn from(kind: ErrorKind) -> Self {
        ErrorBody {
            success: false,
            error: kind.status().as_u16(),
            message: kind.message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        match &self.cause {
            Cause::Connection(_) | Cause::Store(_) => {
                tracing::error!(status = status.as_u16(), cause = %self.cause, "Request failed")
            }
            _ => tracing::warn!(status = status.as_u16(), cause = %self.cause, "Request rejected"),
        }
        (status, Json(ErrorBody::from(self.kind))).into_response()
    }
}

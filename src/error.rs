// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 500 Internal Server Error
    #[error("internal server error: {0}")]
    InternalServerError(String),

    // 500, or 409 for constraint violations
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    // 400 Bad Request
    #[error("bad request: {0}")]
    BadRequest(String),

    // 401 Unauthorized
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    // 404 Not Found
    #[error("not found: {0}")]
    NotFound(String),

    // 405 Method Not Allowed
    #[error("method not allowed")]
    MethodNotAllowed,

    // 409 Conflict (e.g., duplicate name)
    #[error("conflict: {0}")]
    Conflict(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthorized("Unauthorized".to_string())
    }

    pub fn bad_request() -> Self {
        AppError::BadRequest("Bad request".to_string())
    }

    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(err) => match constraint_violation(err) {
                Some(_) => StatusCode::CONFLICT,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

/// Postgres SQLSTATE classes surfaced to the client as 409.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
}

pub fn constraint_violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.code().as_deref() {
        Some("23505") => Some(Violation::Unique),
        Some("23503") => Some(Violation::ForeignKey),
        _ => None,
    }
}

/// Turns the given violation into a 409 with a specific message; any other
/// database error passes through unchanged.
pub fn conflict_on(err: sqlx::Error, violation: Violation, message: &str) -> AppError {
    if constraint_violation(&err) == Some(violation) {
        AppError::Conflict(message.to_string())
    } else {
        AppError::Database(err)
    }
}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into the `{"message": ...}` envelope with the matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Database(err) => match constraint_violation(&err) {
                Some(Violation::Unique) => "This record already exists".to_string(),
                Some(Violation::ForeignKey) => {
                    "This record is referenced by or references missing data".to_string()
                }
                None => {
                    tracing::error!("Database error: {:?}", err);
                    "Internal server error".to_string()
                }
            },
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg,
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::bad_request()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(validation_message(&errors))
    }
}

/// Picks the first human-readable message out of a validator report.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field.clone(), e)))
        .map(|(field, e)| match &e.message {
            Some(msg) => msg.to_string(),
            None => format!("Invalid value for {}", field),
        })
        .next()
        .unwrap_or_else(|| "Bad request".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::bad_request().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("Movie not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_not_a_constraint_violation() {
        assert_eq!(constraint_violation(&sqlx::Error::RowNotFound), None);
    }
}

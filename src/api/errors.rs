use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::DomainError;

/// Field name -> messages, as returned in validation problems
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// API error type with HTTP status code and problem details
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 400 validation problem carrying field-level messages
    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: VALIDATION_TITLE.to_string(),
            errors: Some(errors),
        }
    }

    /// Creates a 400 validation problem for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::validation(errors)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "title": self.message,
            "status": self.status.as_u16(),
        });

        if let Some(errors) = self.errors {
            body["errors"] = json!(errors);
        }

        let headers = [(
            axum::http::header::CONTENT_TYPE,
            "application/problem+json",
        )];

        (self.status, headers, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(_) | DomainError::AlreadyDeleted(_) => {
                tracing::warn!("Rejected operation: {}", err);
                Self::not_found(err.to_string())
            }
            DomainError::LoginTaken(_) => Self::field("login", err.to_string()),
            DomainError::Storage(_) => {
                // Full error stays in the log; clients get a generic message
                tracing::error!("Internal error: {}", err);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;

/// Non-negative integer id taken from the route path
///
/// Negative or non-numeric ids are rejected with a 400 validation problem
/// before the handler runs.
///
/// Usage:
/// ```rust,ignore
/// async fn get_note(ValidId(id): ValidId) -> Result<String, ApiError> {
///     Ok(format!("note {}", id))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValidId(pub i64);

impl ValidId {
    /// Parses a raw path segment
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let id: i64 = raw
            .parse()
            .map_err(|_| ApiError::field("id", format!("The value '{}' is not valid.", raw)))?;

        if id < 0 {
            return Err(ApiError::field("id", "id must be positive number"));
        }

        Ok(ValidId(id))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        ValidId::parse(&raw)
    }
}

/// JSON body whose rejections are reported as 400 problems
///
/// Axum's own `Json` answers malformed bodies with plain-text 415/422
/// responses; this wrapper reports them as 400 problems. Absent fields are
/// left to the request types, which declare them as `Option`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(ValidJson(value))
    }
}

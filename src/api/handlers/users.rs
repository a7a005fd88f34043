use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{created, Created};
use crate::api::errors::ApiError;
use crate::api::middleware::{ValidId, ValidJson};
use crate::api::validation::Validator;
use crate::domain::note::NoteSummary;
use crate::domain::repositories::{NoteRepository, UserRepository};
use crate::domain::user::{FirstName, Login, Password, UserDetail, UserFields, UserSummary};
use crate::domain::value_objects::{optional_text, required};
use crate::infrastructure::repositories::{SqliteNoteRepository, SqliteUserRepository};

/// Request body for creating a user
///
/// Required fields are optional on the wire so that a missing value is
/// reported as a field error instead of a deserialization failure.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub login: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for updating a user; every mutable field is overwritten
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

impl CreateUserRequest {
    fn validate(&self) -> Result<UserFields, ApiError> {
        let mut v = Validator::new();
        let fields = check_fields(
            &mut v,
            self.login.as_deref(),
            self.password.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
        );

        fields.ok_or_else(|| v.into_error())
    }
}

impl UpdateUserRequest {
    fn validate(&self) -> Result<(i64, UserFields), ApiError> {
        let mut v = Validator::new();
        let user_id = v.check("userId", required("UserId", self.user_id));
        let fields = check_fields(
            &mut v,
            self.login.as_deref(),
            self.password.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
        );

        let (Some(user_id), Some(fields)) = (user_id, fields) else {
            return Err(v.into_error());
        };
        Ok((user_id, fields))
    }
}

fn check_fields(
    v: &mut Validator,
    login: Option<&str>,
    password: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Option<UserFields> {
    let login = v.check("login", Login::new(login.unwrap_or_default()));
    let password = v.check("password", Password::new(password.unwrap_or_default()));
    let first_name = v.check("firstName", FirstName::new(first_name.unwrap_or_default()));
    let last_name = v.check("lastName", optional_text("LastName", last_name));

    Some(UserFields {
        login: login?,
        password: password?,
        first_name: first_name?,
        last_name: last_name?,
    })
}

/// List all users
///
/// GET /api/v1/user
pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let user_repo = SqliteUserRepository::new(pool);
    Ok(Json(user_repo.list().await?))
}

/// Get a user by ID
///
/// GET /api/v1/user/:id
pub async fn get_user(
    State(pool): State<SqlitePool>,
    ValidId(id): ValidId,
) -> Result<Json<UserDetail>, ApiError> {
    let user_repo = SqliteUserRepository::new(pool);
    let user = user_repo
        .get_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not Found"))?;

    Ok(Json(user))
}

/// List the notes owned by a user
///
/// GET /api/v1/user/:id/notes
pub async fn list_user_notes(
    State(pool): State<SqlitePool>,
    ValidId(id): ValidId,
) -> Result<Json<Vec<NoteSummary>>, ApiError> {
    let note_repo = SqliteNoteRepository::new(pool);
    Ok(Json(note_repo.list_by_user(id).await?))
}

/// Create a user with an unused login
///
/// POST /api/v1/user
pub async fn create_user(
    State(pool): State<SqlitePool>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<Created, ApiError> {
    let fields = req.validate()?;

    let user_repo = SqliteUserRepository::new(pool);
    if !user_repo.is_available_for_create(&fields.login).await? {
        tracing::warn!(login = %fields.login, "User rejected: login already taken");
        return Err(ApiError::field(
            "login",
            format!("user with '{}' login already exist", fields.login),
        ));
    }

    let id = user_repo.create(fields).await?;
    tracing::info!(user_id = id, "User created");

    Ok(created("/api/v1/user", id))
}

/// Update all mutable fields of a user
///
/// PUT /api/v1/user
pub async fn update_user(
    State(pool): State<SqlitePool>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let (user_id, fields) = req.validate()?;

    let user_repo = SqliteUserRepository::new(pool);
    if !user_repo.is_available_for_update(user_id).await? {
        tracing::warn!(user_id, "User update rejected: not available");
        return Err(ApiError::not_found("Not Found"));
    }

    user_repo.update(user_id, fields).await?;
    tracing::info!(user_id, "User updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a user; the user's notes are kept
///
/// DELETE /api/v1/user/:id
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    let user_repo = SqliteUserRepository::new(pool);
    user_repo.delete(id).await?;
    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

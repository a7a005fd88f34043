use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{created, Created};
use crate::api::errors::ApiError;
use crate::api::middleware::{ValidId, ValidJson};
use crate::api::validation::Validator;
use crate::domain::note::{NoteDetail, NoteFields, NoteSummary, Title};
use crate::domain::repositories::NoteRepository;
use crate::domain::value_objects::{optional_text, required};
use crate::infrastructure::repositories::SqliteNoteRepository;

/// Request body for creating a note
///
/// Required fields are optional on the wire so that a missing value is
/// reported as a field error instead of a deserialization failure.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Request body for updating a note
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub note_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CreateNoteRequest {
    fn validate(&self) -> Result<(i64, NoteFields), ApiError> {
        let mut v = Validator::new();
        let user_id = v.check("userId", required("UserId", self.user_id));
        let fields = check_fields(&mut v, self.title.as_deref(), self.description.as_deref());

        let (Some(user_id), Some(fields)) = (user_id, fields) else {
            return Err(v.into_error());
        };
        Ok((user_id, fields))
    }
}

impl UpdateNoteRequest {
    fn validate(&self) -> Result<(i64, NoteFields), ApiError> {
        let mut v = Validator::new();
        let note_id = v.check("noteId", required("NoteId", self.note_id));
        let fields = check_fields(&mut v, self.title.as_deref(), self.description.as_deref());

        let (Some(note_id), Some(fields)) = (note_id, fields) else {
            return Err(v.into_error());
        };
        Ok((note_id, fields))
    }
}

fn check_fields(
    v: &mut Validator,
    title: Option<&str>,
    description: Option<&str>,
) -> Option<NoteFields> {
    let title = v.check("title", Title::new(title.unwrap_or_default()));
    let description = v.check("description", optional_text("Description", description));

    Some(NoteFields {
        title: title?,
        description: description?,
    })
}

/// List all notes
///
/// GET /api/v1/note
pub async fn list_notes(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<NoteSummary>>, ApiError> {
    let note_repo = SqliteNoteRepository::new(pool);
    let notes = note_repo.list().await?;

    Ok(Json(notes))
}

/// Get a note by ID
///
/// GET /api/v1/note/:id
pub async fn get_note(
    State(pool): State<SqlitePool>,
    ValidId(id): ValidId,
) -> Result<Json<NoteDetail>, ApiError> {
    let note_repo = SqliteNoteRepository::new(pool);
    let note = note_repo
        .get_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not Found"))?;

    Ok(Json(note))
}

/// Create a note for an existing user
///
/// POST /api/v1/note
pub async fn create_note(
    State(pool): State<SqlitePool>,
    ValidJson(req): ValidJson<CreateNoteRequest>,
) -> Result<Created, ApiError> {
    let (user_id, fields) = req.validate()?;

    let note_repo = SqliteNoteRepository::new(pool);
    if !note_repo.is_available_for_create(user_id).await? {
        tracing::warn!(user_id, "Note rejected: owner does not exist");
        return Err(ApiError::field(
            "userId",
            format!("user with {} id not exist", user_id),
        ));
    }

    let id = note_repo.create(user_id, fields).await?;
    tracing::info!(note_id = id, user_id, "Note created");

    Ok(created("/api/v1/note", id))
}

/// Update a note's title and description
///
/// PUT /api/v1/note
pub async fn update_note(
    State(pool): State<SqlitePool>,
    ValidJson(req): ValidJson<UpdateNoteRequest>,
) -> Result<StatusCode, ApiError> {
    let (note_id, fields) = req.validate()?;

    let note_repo = SqliteNoteRepository::new(pool);
    if !note_repo.is_available_for_update(note_id).await? {
        tracing::warn!(note_id, "Note update rejected: not available");
        return Err(ApiError::not_found("Not Found"));
    }

    note_repo.update(note_id, fields).await?;
    tracing::info!(note_id, "Note updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a note
///
/// DELETE /api/v1/note/:id
pub async fn delete_note(
    State(pool): State<SqlitePool>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    let note_repo = SqliteNoteRepository::new(pool);
    note_repo.delete(id).await?;
    tracing::info!(note_id = id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult, Entity};
use crate::domain::lifecycle::RecordState;
use crate::domain::note::{Note, NoteDetail, NoteFields, NoteSummary};
use crate::domain::repositories::NoteRepository;

/// SQLite implementation of NoteRepository
///
/// Creation and modification dates are stamped with the server's local
/// calendar date.
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    /// Creates a new SqliteNoteRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn list(&self) -> DomainResult<Vec<NoteSummary>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT NoteId, UserId, Title, Description, DateCreated, DateModified, IsDeleted
            FROM Notes
            WHERE IsDeleted = 0
            ORDER BY NoteId
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to list notes", e))?;

        Ok(notes.iter().map(NoteSummary::from).collect())
    }

    async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<NoteSummary>> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT NoteId, UserId, Title, Description, DateCreated, DateModified, IsDeleted
            FROM Notes
            WHERE UserId = ? AND IsDeleted = 0
            ORDER BY NoteId
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to list notes by user", e))?;

        Ok(notes.iter().map(NoteSummary::from).collect())
    }

    async fn get_detail(&self, id: i64) -> DomainResult<Option<NoteDetail>> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT NoteId, UserId, Title, Description, DateCreated, DateModified, IsDeleted
            FROM Notes
            WHERE NoteId = ? AND IsDeleted = 0
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to find note by id", e))?;

        Ok(note.map(NoteDetail::from))
    }

    async fn create(&self, user_id: i64, fields: NoteFields) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO Notes (UserId, Title, Description, DateCreated, DateModified, IsDeleted)
            VALUES (?, ?, ?, ?, NULL, 0)
            "#,
        )
        .bind(user_id)
        .bind(fields.title.as_str())
        .bind(fields.description.as_deref())
        .bind(today())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to create note", e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(note_id = id, user_id, "Note row inserted");
        Ok(id)
    }

    async fn update(&self, id: i64, fields: NoteFields) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE Notes
            SET Title = ?, Description = ?, DateModified = ?
            WHERE NoteId = ? AND IsDeleted = 0
            "#,
        )
        .bind(fields.title.as_str())
        .bind(fields.description.as_deref())
        .bind(today())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to update note", e))?;

        if result.rows_affected() == 0 {
            // Nothing matched: report whether the row is missing or soft-deleted
            self.state(id).await?.ensure_updatable(Entity::Note)?;
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        sqlx::query("UPDATE Notes SET IsDeleted = 1 WHERE NoteId = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to delete note", e))?;

        Ok(())
    }

    async fn state(&self, id: i64) -> DomainResult<RecordState> {
        let flag: Option<bool> = sqlx::query_scalar("SELECT IsDeleted FROM Notes WHERE NoteId = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to load note state", e))?;

        Ok(RecordState::from_deleted_flag(flag))
    }

    async fn is_available_for_update(&self, id: i64) -> DomainResult<bool> {
        Ok(self.state(id).await?.is_active())
    }

    async fn is_available_for_create(&self, user_id: i64) -> DomainResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM Users WHERE UserId = ? AND IsDeleted = 0)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to check note owner", e))?;

        Ok(exists)
    }
}

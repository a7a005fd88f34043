use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::lifecycle::RecordState;
use crate::domain::note::{NoteDetail, NoteFields, NoteSummary};

/// Repository trait for notes
///
/// Defines the contract for persisting and retrieving notes.
/// Reads never return soft-deleted notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List all non-deleted notes
    async fn list(&self) -> DomainResult<Vec<NoteSummary>>;

    /// List the non-deleted notes owned by a user
    async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<NoteSummary>>;

    /// Find a non-deleted note by ID
    async fn get_detail(&self, id: i64) -> DomainResult<Option<NoteDetail>>;

    /// Create a note dated today and return its store-assigned ID
    ///
    /// The owning user is not checked here; callers check
    /// [`NoteRepository::is_available_for_create`] beforehand.
    async fn create(&self, user_id: i64, fields: NoteFields) -> DomainResult<i64>;

    /// Overwrite title and description and stamp today's modified date
    ///
    /// Fails with `NotFound` when no row exists and with `AlreadyDeleted`
    /// when the row is soft-deleted.
    async fn update(&self, id: i64, fields: NoteFields) -> DomainResult<()>;

    /// Soft-delete a note; a missing ID is a no-op
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Lifecycle state of the row with this ID
    async fn state(&self, id: i64) -> DomainResult<RecordState>;

    /// True iff a non-deleted note with this ID exists
    async fn is_available_for_update(&self, id: i64) -> DomainResult<bool>;

    /// True iff a non-deleted *user* with this ID exists to own a new note
    async fn is_available_for_create(&self, user_id: i64) -> DomainResult<bool>;
}

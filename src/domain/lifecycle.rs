use super::errors::{DomainError, DomainResult, Entity};

/// Lifecycle state of a soft-deletable record
///
/// # State Transitions
/// ```text
/// NonExistent -> Active -> Deleted
///                  ^  |      ^  |
///                  +--+      +--+
///                 update    delete
/// ```
///
/// Deleted rows are never physically removed; reads simply stop seeing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// No row with the id exists
    NonExistent,
    /// Row exists and is visible to reads
    Active,
    /// Row exists but carries the soft-delete flag
    Deleted,
}

impl RecordState {
    /// Derives the state from an optional `IsDeleted` lookup
    ///
    /// `None` means the row was not found.
    pub fn from_deleted_flag(flag: Option<bool>) -> Self {
        match flag {
            None => RecordState::NonExistent,
            Some(false) => RecordState::Active,
            Some(true) => RecordState::Deleted,
        }
    }

    /// Fails unless the record can be updated
    ///
    /// Only `Active` records accept updates. A missing row reports
    /// `NotFound` and a soft-deleted one reports `AlreadyDeleted`.
    ///
    /// # Example
    /// ```
    /// use notes_api::domain::{Entity, RecordState};
    ///
    /// assert!(RecordState::Active.ensure_updatable(Entity::Note).is_ok());
    /// assert!(RecordState::Deleted.ensure_updatable(Entity::Note).is_err());
    /// ```
    pub fn ensure_updatable(&self, entity: Entity) -> DomainResult<()> {
        match self {
            RecordState::Active => Ok(()),
            RecordState::NonExistent => Err(DomainError::NotFound(entity)),
            RecordState::Deleted => Err(DomainError::AlreadyDeleted(entity)),
        }
    }

    pub fn is_active(&self) -> bool {
        *self == RecordState::Active
    }
}

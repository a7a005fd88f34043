use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::value_objects::Title;

/// Note row as persisted in the `Notes` table
///
/// # Invariants
/// - `date_created` is stamped once, at creation
/// - `date_modified` is `None` until the first update, then tracks the
///   date of the latest update
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct Note {
    pub note_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date_created: NaiveDate,
    pub date_modified: Option<NaiveDate>,
    pub is_deleted: bool,
}

impl Note {
    /// Date of the last change: the modified date, or the creation date
    /// for notes never updated
    pub fn effective_modified_date(&self) -> NaiveDate {
        self.date_modified.unwrap_or(self.date_created)
    }
}

/// Validated mutable fields of a note
#[derive(Debug, Clone)]
pub struct NoteFields {
    pub title: Title,
    pub description: Option<String>,
}

/// Reduced projection returned by note listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub note_id: i64,
    pub title: String,
    pub date_modified: NaiveDate,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            note_id: note.note_id,
            title: note.title.clone(),
            date_modified: note.effective_modified_date(),
        }
    }
}

/// Full projection returned for a single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDetail {
    pub note_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date_created: NaiveDate,
    pub date_modified: Option<NaiveDate>,
}

impl From<Note> for NoteDetail {
    fn from(note: Note) -> Self {
        Self {
            note_id: note.note_id,
            user_id: note.user_id,
            title: note.title,
            description: note.description,
            date_created: note.date_created,
            date_modified: note.date_modified,
        }
    }
}

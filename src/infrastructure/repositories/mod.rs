// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod sqlite_note_repository;
pub mod sqlite_user_repository;

pub use sqlite_note_repository::SqliteNoteRepository;
pub use sqlite_user_repository::SqliteUserRepository;

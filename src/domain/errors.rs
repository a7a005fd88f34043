use std::fmt;

use thiserror::Error;

/// Kind of record an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Note,
    User,
}

impl Entity {
    /// Capitalized name used at the start of messages ("Note deleted")
    pub fn title(&self) -> &'static str {
        match self {
            Entity::Note => "Note",
            Entity::User => "User",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Note => write!(f, "note"),
            Entity::User => write!(f, "user"),
        }
    }
}

/// Errors raised by note and user operations
#[derive(Debug, Error)]
pub enum DomainError {
    /// No row with the requested id exists at all
    #[error("Unable to find the {0}")]
    NotFound(Entity),

    /// The row exists but has been soft-deleted
    #[error("{} deleted", .0.title())]
    AlreadyDeleted(Entity),

    /// Another non-deleted user already holds this login
    #[error("user with '{0}' login already exist")]
    LoginTaken(String),

    /// Underlying store fault (connection loss, SQL error, ...)
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Wraps a store fault with a short description of what was attempted
    pub fn storage(context: &str, err: impl fmt::Display) -> Self {
        DomainError::Storage(format!("{}: {}", context, err))
    }
}

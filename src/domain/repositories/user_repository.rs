use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::lifecycle::RecordState;
use crate::domain::user::{Login, UserDetail, UserFields, UserSummary};

/// Repository trait for users
///
/// Every read filters out soft-deleted rows. Mutations never remove rows
/// physically.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all non-deleted users
    async fn list(&self) -> DomainResult<Vec<UserSummary>>;

    /// Find a non-deleted user by ID
    async fn get_detail(&self, id: i64) -> DomainResult<Option<UserDetail>>;

    /// Create a new user and return its store-assigned ID
    ///
    /// Callers should check [`UserRepository::is_available_for_create`]
    /// first; a login clash detected by the store yields `LoginTaken`.
    async fn create(&self, fields: UserFields) -> DomainResult<i64>;

    /// Overwrite all mutable fields of a user
    ///
    /// Fails with `NotFound` when no row exists and with `AlreadyDeleted`
    /// when the row is soft-deleted.
    async fn update(&self, id: i64, fields: UserFields) -> DomainResult<()>;

    /// Soft-delete a user; a missing ID is a no-op
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Lifecycle state of the row with this ID
    async fn state(&self, id: i64) -> DomainResult<RecordState>;

    /// True iff a non-deleted user with this ID exists
    async fn is_available_for_update(&self, id: i64) -> DomainResult<bool>;

    /// True iff no non-deleted user currently holds this login
    async fn is_available_for_create(&self, login: &Login) -> DomainResult<bool>;
}

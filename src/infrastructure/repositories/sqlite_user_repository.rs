use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult, Entity};
use crate::domain::lifecycle::RecordState;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Login, User, UserDetail, UserFields, UserSummary};

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Maps a write failure, recognising the live-login unique index
fn map_write_error(err: sqlx::Error, login: &Login, context: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::LoginTaken(login.to_string())
        }
        _ => DomainError::storage(context, err),
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> DomainResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT UserId, FirstName, LastName, Login, Password, IsDeleted
            FROM Users
            WHERE IsDeleted = 0
            ORDER BY UserId
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to list users", e))?;

        Ok(users.iter().map(UserSummary::from).collect())
    }

    async fn get_detail(&self, id: i64) -> DomainResult<Option<UserDetail>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT UserId, FirstName, LastName, Login, Password, IsDeleted
            FROM Users
            WHERE UserId = ? AND IsDeleted = 0
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to find user by id", e))?;

        Ok(user.map(UserDetail::from))
    }

    async fn create(&self, fields: UserFields) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO Users (FirstName, LastName, Login, Password, IsDeleted)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(fields.first_name.as_str())
        .bind(fields.last_name.as_deref())
        .bind(fields.login.as_str())
        .bind(fields.password.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.login, "Failed to create user"))?;

        let id = result.last_insert_rowid();
        tracing::debug!(user_id = id, "User row inserted");
        Ok(id)
    }

    async fn update(&self, id: i64, fields: UserFields) -> DomainResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE Users
            SET FirstName = ?, LastName = ?, Login = ?, Password = ?
            WHERE UserId = ? AND IsDeleted = 0
            "#,
        )
        .bind(fields.first_name.as_str())
        .bind(fields.last_name.as_deref())
        .bind(fields.login.as_str())
        .bind(fields.password.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &fields.login, "Failed to update user"))?;

        if result.rows_affected() == 0 {
            self.state(id).await?.ensure_updatable(Entity::User)?;
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("UPDATE Users SET IsDeleted = 1 WHERE UserId = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(user_id = id, "Delete of unknown user ignored");
        }

        Ok(())
    }

    async fn state(&self, id: i64) -> DomainResult<RecordState> {
        let flag: Option<bool> = sqlx::query_scalar("SELECT IsDeleted FROM Users WHERE UserId = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage("Failed to load user state", e))?;

        Ok(RecordState::from_deleted_flag(flag))
    }

    async fn is_available_for_update(&self, id: i64) -> DomainResult<bool> {
        Ok(self.state(id).await?.is_active())
    }

    async fn is_available_for_create(&self, login: &Login) -> DomainResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM Users WHERE Login = ? AND IsDeleted = 0)",
        )
        .bind(login.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage("Failed to check login availability", e))?;

        Ok(!taken)
    }
}

use serde::{Deserialize, Serialize};

use super::value_objects::{FirstName, Login, Password};

/// User row as persisted in the `Users` table
///
/// A user owns zero or more notes. Deleting a user only flips
/// `is_deleted`; the user's notes are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub login: String,
    pub password: String,
    pub is_deleted: bool,
}

impl User {
    /// Name shown in user listings: `"first last aka login"`
    ///
    /// A missing last name renders as an empty segment.
    pub fn display_name(&self) -> String {
        format!(
            "{} {} aka {}",
            self.first_name,
            self.last_name.as_deref().unwrap_or_default(),
            self.login
        )
    }
}

/// Validated mutable fields of a user
///
/// Used both for creation and for the full overwrite performed by update.
#[derive(Debug, Clone)]
pub struct UserFields {
    pub login: Login,
    pub password: Password,
    pub first_name: FirstName,
    pub last_name: Option<String>,
}

/// Reduced projection returned by user listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: i64,
    pub display_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            display_name: user.display_name(),
        }
    }
}

/// Full projection returned for a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub login: String,
    pub password: String,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            login: user.login,
            password: user.password,
        }
    }
}

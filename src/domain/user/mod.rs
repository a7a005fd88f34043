// User domain module
// Contains the user entity, its view models and validated fields

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{User, UserDetail, UserFields, UserSummary};
pub use value_objects::{FirstName, Login, Password};

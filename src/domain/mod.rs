// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of transport concerns

pub mod errors;
pub mod lifecycle;
pub mod note;
pub mod repositories;
pub mod user;
pub mod value_objects;

pub use errors::{DomainError, DomainResult, Entity};
pub use lifecycle::RecordState;

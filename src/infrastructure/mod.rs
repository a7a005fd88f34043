// Infrastructure layer module
// Contains database adapters and pool bootstrap
// Follows Hexagonal Architecture

pub mod database;
pub mod repositories;

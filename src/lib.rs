//! Notes API Library
//!
//! This library provides the core functionality for the Notes API:
//! user and note entities with soft-delete lifecycles, their SQLite
//! repositories, and the HTTP surface that exposes them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

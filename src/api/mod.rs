// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod validation;

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{health, notes, users};

/// Builds the application router over a connection pool
pub fn create_router(pool: SqlitePool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let note_routes = Router::new()
        .route(
            "/api/v1/note",
            get(notes::list_notes)
                .post(notes::create_note)
                .put(notes::update_note),
        )
        .route(
            "/api/v1/note/:id",
            get(notes::get_note).delete(notes::delete_note),
        )
        .route_layer(from_fn(middleware::log_requests));

    let user_routes = Router::new()
        .route(
            "/api/v1/user",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route(
            "/api/v1/user/:id",
            get(users::get_user).delete(users::delete_user),
        )
        .route("/api/v1/user/:id/notes", get(users::list_user_notes));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .merge(note_routes)
        .merge(user_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(pool)
}

use axum::{
    http::{header::LOCATION, HeaderName, StatusCode},
    Json,
};

pub mod health;
pub mod notes;
pub mod users;

/// 201 response carrying the new id and its `Location`
pub type Created = (StatusCode, [(HeaderName, String); 1], Json<i64>);

fn created(collection: &str, id: i64) -> Created {
    (
        StatusCode::CREATED,
        [(LOCATION, format!("{}/{}", collection, id))],
        Json(id),
    )
}

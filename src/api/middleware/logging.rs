use axum::{extract::Request, middleware::Next, response::Response};

/// Logs each request before the handler runs and the status it produced
///
/// Usage:
/// ```rust,ignore
/// Router::new()
///     .route("/api/v1/note", get(notes::list_notes))
///     .route_layer(axum::middleware::from_fn(log_requests));
/// ```
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::info!(%method, %path, "Executing handler");
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "Handler result");

    response
}

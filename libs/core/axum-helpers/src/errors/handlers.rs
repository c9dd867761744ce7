use axum::response::{IntoResponse, Response};

use super::{AppError, messages};

/// Fallback for requests that match no route.
pub async fn not_found() -> Response {
    AppError::RouteNotFound(messages::ROUTE_NOT_FOUND.to_string()).into_response()
}

//! Health check endpoints

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};

use crate::state::AppState;

/// `/ready` pings the database on every call
async fn ready(State(db): State<DatabaseConnection>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async move { check_health(&db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

/// `/health` and `/ready`, mounted at the root
pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state.db.clone())
        .merge(health_router(state.config.app, state.degraded))
}

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the service started without its database
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    /// Check name to `connected` / `disconnected`
    #[serde(flatten)]
    pub checks: BTreeMap<String, &'static str>,
}

#[derive(Clone, Copy, Debug)]
struct HealthState {
    app: AppInfo,
    degraded: bool,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs the given checks concurrently.
///
/// Answers 200 `{"status": "ready", "<name>": "connected", ...}` when every
/// check passes, otherwise 503 with `not ready` and the failing checks marked
/// `disconnected`.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![(
///     "database",
///     Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let names: Vec<String> = checks.iter().map(|(name, _)| name.to_string()).collect();
    let results = join_all(checks.into_iter().map(|(_, check)| check)).await;

    let mut all_ready = true;
    let mut statuses = BTreeMap::new();

    for (name, result) in names.into_iter().zip(results) {
        let status = match result {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!(check = %name, error = %e, "Readiness check failed");
                all_ready = false;
                "disconnected"
            }
        };
        statuses.insert(name, status);
    }

    let (code, status) = if all_ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };

    (
        code,
        Json(ReadyResponse {
            status,
            checks: statuses,
        }),
    )
        .into_response()
}

/// Liveness handler: 200 as long as the process serves requests.
async fn health_handler(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.degraded { "degraded" } else { "healthy" },
        name: state.app.name,
        version: state.app.version,
        degraded: state.degraded,
    })
}

/// Creates a router with the `/health` endpoint.
///
/// `degraded` is the startup outcome: `true` when the database could not be
/// reached and the service runs without it.
pub fn health_router(app_info: AppInfo, degraded: bool) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            app: app_info,
            degraded,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const APP: AppInfo = AppInfo {
        name: "products_api",
        version: "1.2.3",
    };

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn get_health(degraded: bool) -> Value {
        let response = health_router(APP, degraded)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_health_healthy() {
        assert_eq!(
            get_health(false).await,
            json!({"status": "healthy", "name": "products_api", "version": "1.2.3", "degraded": false})
        );
    }

    #[tokio::test]
    async fn test_health_degraded() {
        let body = get_health(true).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["degraded"], true);
    }

    #[tokio::test]
    async fn test_ready_when_all_checks_pass() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![("database", Box::pin(async { Ok(()) }))];
        let response = run_health_checks(checks).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"status": "ready", "database": "connected"})
        );
    }

    #[tokio::test]
    async fn test_not_ready_when_a_check_fails() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![(
            "database",
            Box::pin(async { Err("connection refused".to_string()) }),
        )];
        let response = run_health_checks(checks).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json_body(response).await,
            json!({"status": "not ready", "database": "disconnected"})
        );
    }
}

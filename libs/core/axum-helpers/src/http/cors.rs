use crate::errors::{AppError, messages};
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::cors::CorsConfig;
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// The single browser origin allowed to call the API.
#[derive(Clone, Debug)]
pub struct AllowedOrigin(HeaderValue);

impl AllowedOrigin {
    pub fn new(origin: &str) -> Result<Self, header::InvalidHeaderValue> {
        HeaderValue::from_str(origin).map(Self)
    }

    pub fn matches(&self, origin: &HeaderValue) -> bool {
        self.0.as_bytes() == origin.as_bytes()
    }

    pub fn header_value(&self) -> HeaderValue {
        self.0.clone()
    }
}

impl TryFrom<&CorsConfig> for AllowedOrigin {
    type Error = header::InvalidHeaderValue;

    fn try_from(config: &CorsConfig) -> Result<Self, Self::Error> {
        Self::new(&config.allowed_origin)
    }
}

/// Creates the CORS layer for the configured origin.
///
/// - Methods: GET, POST, PUT, PATCH, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(origin: &AllowedOrigin) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin.header_value())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Rejects requests whose `Origin` differs from the allowed one.
///
/// Requests without an `Origin` header pass through; only cross-origin
/// browsers send one. Mount with `middleware::from_fn_with_state`.
pub async fn origin_guard(
    State(allowed): State<AllowedOrigin>,
    request: Request,
    next: Next,
) -> Response {
    match request.headers().get(header::ORIGIN) {
        Some(origin) if !allowed.matches(origin) => {
            tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");
            AppError::Forbidden(messages::CORS_REJECTED.to_string()).into_response()
        }
        _ => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let allowed = AllowedOrigin::new("http://localhost:5173").unwrap();
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(&allowed))
            .layer(middleware::from_fn_with_state(allowed, origin_guard))
    }

    fn request(origin: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_request_without_origin_passes() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let response = app()
            .oneshot(request(Some("http://localhost:5173")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_other_origin_is_forbidden() {
        let response = app()
            .oneshot(request(Some("http://evil.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Error de CORS"}"#);
    }

    #[test]
    fn test_allowed_origin_from_config() {
        let config = CorsConfig::new("https://shop.example.com");
        let allowed = AllowedOrigin::try_from(&config).unwrap();
        assert!(allowed.matches(&HeaderValue::from_static("https://shop.example.com")));
        assert!(!allowed.matches(&HeaderValue::from_static("https://shop.example.com:8443")));
    }
}

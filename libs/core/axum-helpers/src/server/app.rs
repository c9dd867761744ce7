use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::not_found;
use crate::http::cors::{AllowedOrigin, create_cors_layer, origin_guard};
use axum::extract::Request;
use axum::http::Uri;
use axum::http::uri::PathAndQuery;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower::ServiceExt as _;
use tower::util::MapRequest;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/docs/openapi.json";

/// Creates the application router around the API routes.
///
/// This sets up:
/// - API routes nested under `/api`
/// - Swagger UI at `/docs` (document at `/docs/openapi.json`), plus ReDoc,
///   RapiDoc and Scalar at `/redoc`, `/rapidoc` and `/scalar`
/// - 404 fallback with a JSON body
/// - Access log (`TraceLayer` at INFO)
/// - CORS for exactly one origin; other origins get 403
///
/// `apis` must already carry its state. Health routes are merged by the caller.
///
/// ```ignore
/// let allowed = AllowedOrigin::try_from(&config.cors)?;
/// let router = create_router::<ApiDoc>(api_routes, &allowed);
/// ```
pub fn create_router<T>(apis: Router, allowed_origin: &AllowedOrigin) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    info!(origin = ?allowed_origin, "CORS configured");

    Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(create_cors_layer(allowed_origin))
        .layer(middleware::from_fn_with_state(
            allowed_origin.clone(),
            origin_guard,
        ))
}

/// Router wrapped so `/api/...` paths match with or without a trailing slash
pub type ApiService = MapRequest<Router, fn(Request) -> Request>;

/// Strips trailing slashes from `/api/...` paths before routing.
///
/// Doc routes are left untouched; Swagger UI redirects `/docs` to `/docs/`.
pub fn trim_api_trailing_slash(router: Router) -> ApiService {
    router.map_request(trim_trailing_slash as fn(Request) -> Request)
}

fn trim_trailing_slash(mut request: Request) -> Request {
    let path = request.uri().path();
    if !path.starts_with("/api/") || !path.ends_with('/') {
        return request;
    }

    let trimmed = path.trim_end_matches('/');
    let path_and_query = match request.uri().query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };

    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = PathAndQuery::try_from(path_and_query).ok();
    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
    request
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained first. `cleanup` is given at most
/// `shutdown_timeout` before the process moves on.
///
/// ```ignore
/// create_production_app(
///     router,
///     &config.server,
///     Duration::from_secs(30),
///     close_postgres(db, "products"),
/// ).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let app = trim_api_trailing_slash(router);
    let serve_result = axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
        .with_graceful_shutdown(coordinated_shutdown(coordinator.clone()))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // A serve error skips the signal; release the cleanup task anyway
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

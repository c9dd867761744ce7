//! Server infrastructure module.
//!
//! - Router setup with OpenAPI documentation and CORS
//! - Health and readiness endpoints
//! - Graceful shutdown with connection cleanup
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &allowed_origin)
//!     .merge(health_router(app_info!(), degraded));
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{
    ApiService, OPENAPI_JSON_PATH, create_production_app, create_router, trim_api_trailing_slash,
};
pub use cleanup::close_postgres;
pub use health::{
    HealthCheckFuture, HealthResponse, ReadyResponse, health_router, run_health_checks,
};
pub use shutdown::ShutdownCoordinator;

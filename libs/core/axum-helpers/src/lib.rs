//! # Axum Helpers
//!
//! Utilities shared by the HTTP services of this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS layer and origin guard
//! - **[`errors`]**: `AppError` and its JSON responses
//! - **[`validation`]**: Declarative field rules and the `{"errors": [...]}` body
//! - **[`extractors`]**: Integer id path and lenient JSON body extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{AllowedOrigin, create_production_app, create_router, health_router};
//!
//! let allowed = AllowedOrigin::try_from(&config.cors)?;
//! let router = create_router::<ApiDoc>(api_routes, &allowed)
//!     .merge(health_router(config.app, false));
//!
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
};

// Re-export HTTP middleware
pub use http::{AllowedOrigin, create_cors_layer, origin_guard};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, JsonPayload, ValidatedJson};

// Re-export validation types
pub use validation::{FieldError, Location, Rule, ValidateInput, ValidationErrors, run_rules};

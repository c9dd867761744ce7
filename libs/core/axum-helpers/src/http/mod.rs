//! HTTP middleware module.
//!
//! ```ignore
//! use axum_helpers::http::{AllowedOrigin, create_cors_layer, origin_guard};
//!
//! let allowed = AllowedOrigin::new("http://localhost:5173")?;
//! let app = Router::new()
//!     .layer(create_cors_layer(&allowed))
//!     .layer(axum::middleware::from_fn_with_state(allowed, origin_guard));
//! ```

pub mod cors;

pub use cors::{AllowedOrigin, create_cors_layer, origin_guard};

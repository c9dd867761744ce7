//! Products API - REST server

use axum_helpers::{AllowedOrigin, close_postgres, create_production_app, create_router};
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{DatabaseConnection, check_health, connect_lazy, run_migrations};
use database::{RetryConfig, retry_with_backoff};
use migration::Migrator;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    load_dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // A malformed URL is fatal; an unreachable server only degrades the service
    let db = connect_lazy(config.postgres.clone()).await?;
    let degraded = !prepare_database(&db, config.app.name).await;

    let allowed_origin = AllowedOrigin::try_from(&config.cors)?;

    let state = AppState {
        config,
        db,
        degraded,
    };

    let app = create_router::<openapi::ApiDoc>(api::routes(&state), &allowed_origin)
        .merge(api::health::router(&state));

    info!(
        port = state.config.server.port,
        degraded = state.degraded,
        "Starting Products API"
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        close_postgres(state.db.clone(), "products"),
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

/// Waits for the database and applies pending migrations.
///
/// Returns `false` when either step fails; the error is logged and the
/// server keeps starting.
async fn prepare_database(db: &DatabaseConnection, app_name: &str) -> bool {
    let retry = RetryConfig::new()
        .with_max_retries(3)
        .with_initial_delay(500)
        .with_max_delay(4_000);

    if let Err(e) = retry_with_backoff(|| check_health(db), retry).await {
        error!(error = %e, "Database unreachable, starting in degraded mode");
        return false;
    }
    info!("Database connected");

    if let Err(e) = run_migrations::<Migrator>(db, app_name).await {
        error!(error = %e, "Migrations failed, starting in degraded mode");
        return false;
    }

    true
}

//! Resource cleanup run after the server stops accepting requests.

use tracing::{error, info};

/// Close the SeaORM pool, logging the outcome.
///
/// ```ignore
/// create_production_app(router, &config, timeout, close_postgres(db, "products")).await?;
/// ```
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection '{}' closed successfully", name),
        Err(e) => error!("Error closing PostgreSQL connection '{}': {}", name, e),
    }
}


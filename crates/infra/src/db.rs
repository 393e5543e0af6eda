//! Database adapters: connection pool and schema bootstrap.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;

/// Open a Postgres pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Create the `invoices` table when it does not exist yet.
///
/// Ids are assigned by the database; amounts are minor units.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id          TEXT PRIMARY KEY DEFAULT gen_random_uuid()::text,
            customer_id TEXT NOT NULL,
            amount      BIGINT NOT NULL CHECK (amount > 0),
            date        DATE NOT NULL,
            status      TEXT NOT NULL CHECK (status IN ('pending', 'paid'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("invoices schema ensured");
    Ok(())
}

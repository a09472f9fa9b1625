//! Database module
//!
//! Connection pool setup for the PostgreSQL backend.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a pool and check that the database answers.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    verify_connection(&pool).await?;
    Ok(pool)
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

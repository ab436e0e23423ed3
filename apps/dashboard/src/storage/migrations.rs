use color_eyre::Result;
use sqlx::{
    query,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;

/// Creates the client storage table if it doesn't exist
pub async fn setup_storage(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS client_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Opens (creating when missing) the sqlite database behind `database_url`.
///
/// A single connection keeps `sqlite::memory:` databases shared across queries.
pub async fn create_storage_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!(%database_url, "opening client storage");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open client storage: {e}"))?;

    setup_storage(&pool).await?;

    Ok(pool)
}

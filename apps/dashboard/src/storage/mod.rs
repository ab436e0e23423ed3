// Client-side storage for the dashboard
// Holds the persisted session token in a small sqlite key/value table

pub mod migrations;
pub mod queries;

pub use migrations::{create_storage_pool, setup_storage};

use async_trait::async_trait;
use color_eyre::Result;
use sqlx::SqlitePool;

/// Fixed key the session token lives under.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";

/// Read access to the persisted session token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load_token(&self) -> Result<Option<String>>;
}

#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    pool: SqlitePool,
}

impl SqliteTokenStore {
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool = create_storage_pool(database_url).await?;
        Ok(Self { pool })
    }

    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save_token(&self, token: &str) -> Result<()> {
        queries::set_value(&self.pool, TOKEN_STORAGE_KEY, token).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn load_token(&self) -> Result<Option<String>> {
        let token = queries::get_value(&self.pool, TOKEN_STORAGE_KEY).await?;
        Ok(token.filter(|value| !value.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_token_loads_as_none() -> Result<()> {
        let store = SqliteTokenStore::open("sqlite::memory:").await?;
        assert_eq!(store.load_token().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn saved_token_round_trips_and_overwrites() -> Result<()> {
        let store = SqliteTokenStore::open("sqlite::memory:").await?;
        store.save_token("first").await?;
        store.save_token("abc.def.ghi").await?;
        assert_eq!(store.load_token().await?, Some("abc.def.ghi".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn empty_token_is_treated_as_absent() -> Result<()> {
        let store = SqliteTokenStore::open("sqlite::memory:").await?;
        store.save_token("").await?;
        assert_eq!(store.load_token().await?, None);
        Ok(())
    }
}

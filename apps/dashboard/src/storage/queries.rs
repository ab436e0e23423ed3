use sqlx::{query, query_scalar, SqlitePool};

pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    query_scalar::<_, String>("SELECT value FROM client_storage WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
}

pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    let updated = chrono::Utc::now().to_rfc3339();

    query(
        "INSERT INTO client_storage (key, value, updated) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
    )
    .bind(key)
    .bind(value)
    .bind(updated)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_storage_pool;

    #[tokio::test]
    async fn test_get_missing_value() -> color_eyre::Result<()> {
        let pool = create_storage_pool("sqlite::memory:").await?;
        assert_eq!(get_value(&pool, "nothing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_then_get_value() -> color_eyre::Result<()> {
        let pool = create_storage_pool("sqlite::memory:").await?;

        set_value(&pool, "auth_token", "secret").await?;
        assert_eq!(get_value(&pool, "auth_token").await?, Some("secret".to_string()));

        // Keys are independent
        set_value(&pool, "theme", "dark").await?;
        assert_eq!(get_value(&pool, "auth_token").await?, Some("secret".to_string()));

        Ok(())
    }
}

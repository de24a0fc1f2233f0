use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Connect to an existing, externally populated store. Nothing is
    /// created or migrated; a missing file is a startup error.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Single-connection in-memory store with the registry schema applied.
    /// Every pooled connection to `:memory:` is a separate database, so the
    /// pool never grows past one and never recycles it.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_does_not_create_missing_store() {
        let path = std::env::temp_dir().join(format!(
            "chariot-registry-missing-{}.db",
            std::process::id()
        ));
        let url = format!("sqlite://{}", path.display());

        assert!(Database::new(&url).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn in_memory_store_has_registry_tables() {
        let db = Database::in_memory().await.unwrap();
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
             ('citizens', 'relationships', 'chariot_licences', 'parking_fines', 'speeding_fines')",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(count, 5);
    }
}

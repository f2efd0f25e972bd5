// ABOUTME: SQLite-backed option store
// ABOUTME: Persists each named record as JSON text with an upsert per write

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::options::{validate_option_name, OptionStore};

pub struct SqliteOptionStore {
    pool: SqlitePool,
}

impl SqliteOptionStore {
    /// Wrap an existing pool. Call [`SqliteOptionStore::migrate`] before first use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and run the embedded migrations.
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        info!("Opening option store at {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OptionStore for SqliteOptionStore {
    async fn get_option(&self, name: &str) -> StorageResult<Option<Value>> {
        debug!("Fetching option: {}", name);
        validate_option_name(name)?;

        let row = sqlx::query("SELECT option_value FROM options WHERE option_name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("option_value")?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn update_option(&self, name: &str, value: &Value) -> StorageResult<()> {
        debug!("Updating option: {}", name);
        validate_option_name(name)?;

        let serialized = serde_json::to_string(value)?;

        sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value, updated_at)
            VALUES (?, ?, datetime('now', 'utc'))
            ON CONFLICT(option_name) DO UPDATE SET
                option_value = excluded.option_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(serialized)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    async fn delete_option(&self, name: &str) -> StorageResult<bool> {
        debug!("Deleting option: {}", name);
        validate_option_name(name)?;

        let result = sqlx::query("DELETE FROM options WHERE option_name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}

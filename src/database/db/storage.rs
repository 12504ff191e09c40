//! Key/value store with the browser local-storage contract: string keys,
//! string values, `get` returns `None` for absent keys.

use sqlx::{Pool, Row, Sqlite};
use tracing::debug;

use crate::database::db::{connection, migrate};
use crate::database::models::User;
use crate::error::Result;

pub const IS_AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const USER_KEY: &str = "user";

#[derive(Clone, Debug)]
pub struct LocalStorage {
    pool: Pool<Sqlite>,
}

impl LocalStorage {
    /// Connects and makes sure the table exists.
    pub async fn open(db_url: &str) -> Result<Self> {
        let pool = connection::get_db_pool(db_url).await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Waits for open connections to finish so the session is on disk.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("local storage closed");
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, "local storage set");
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns whether the key existed.
    pub async fn remove_item(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM local_storage").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM local_storage ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.get::<String, _>("key")).collect())
    }

    // ---- typed helpers for the two keys the app uses ----

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.get_item(IS_AUTHENTICATED_KEY).await?.as_deref() == Some("true"))
    }

    pub async fn stored_user(&self) -> Result<Option<User>> {
        match self.get_item(USER_KEY).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn store_session(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.set_item(IS_AUTHENTICATED_KEY, "true").await?;
        self.set_item(USER_KEY, &json).await?;
        Ok(())
    }
}

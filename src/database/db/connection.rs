use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Opens the pool backing local storage. In-memory databases are per
/// connection, so they get exactly one connection that is never recycled.
pub async fn get_db_pool(db_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    let in_memory = db_url.contains(":memory:") || db_url.contains("mode=memory");

    let options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    options.connect(db_url).await
}

pub mod create;
pub mod users;
pub mod utils;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Open (creating if missing) the SQLite database at `path` and make sure
/// the schema exists.
pub async fn connect(path: &str) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    create::create_tables(&pool).await?;

    Ok(pool)
}

/// In-memory pool, used by the test suites.  Limited to a single
/// connection — each separate checkout of `sqlite::memory:` would
/// otherwise see its own empty database.
pub async fn connect_in_memory() -> sqlx::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create::create_tables(&pool).await?;

    Ok(pool)
}

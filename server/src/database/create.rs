use sqlx::SqlitePool;
use tracing::info;

/// Initialize the database schema.
///
/// One table: the booking platform keeps no sessions table — the signed
/// cookie token is the entire session state.  Activity and reservation
/// tables belong to the booking services and are managed elsewhere.
pub async fn create_tables(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name    TEXT    NOT NULL,
            last_name     TEXT    NOT NULL,
            email         TEXT    NOT NULL UNIQUE,
            password_hash TEXT    NOT NULL,
            role          TEXT    NOT NULL DEFAULT 'USER',
            created_at    INTEGER NOT NULL,
            last_login    INTEGER
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
        .execute(pool)
        .await?;

    info!("Database schema ready");

    Ok(())
}

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::warn;

use shared::types::jwt::Role;

use super::utils::get_timestamp;

/// Data required to INSERT a new user row.  New accounts always start as
/// USER; promotion happens out of band.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Minimal data needed to verify a user's credentials at login.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A full user row as exposed over the API — never carries the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub last_login: Option<i64>,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Single canonicalizing step for role strings read back from the database.
/// Legacy rows may carry lowercase literals; anything unrecognized degrades
/// to USER (least privilege) rather than failing the whole query.
fn role_from_db(raw: &str) -> Role {
    Role::parse(raw).unwrap_or_else(|| {
        warn!("Unknown role {:?} in users table, defaulting to USER", raw);
        Role::User
    })
}

fn record_from_row(row: &SqliteRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        role: role_from_db(row.get::<String, _>("role").as_str()),
        created_at: row.get("created_at"),
        last_login: row.get("last_login"),
    }
}

/// Insert a new user and return its id.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO users (first_name, last_name, email, password_hash, role, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(Role::User.as_str())
    .bind(get_timestamp())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get user authentication data by email
pub async fn get_user_auth(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<UserAuth>> {
    let row = sqlx::query("SELECT id, email, password_hash, role FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| UserAuth {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: role_from_db(row.get::<String, _>("role").as_str()),
    }))
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<UserRecord>> {
    let row = sqlx::query(
        "SELECT id, first_name, last_name, email, role, created_at, last_login
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(record_from_row))
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> sqlx::Result<bool> {
    let row = sqlx::query("SELECT 1 FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Apply a partial update.  The role column is deliberately not reachable
/// from here.  Returns false when the row does not exist.
pub async fn update_user(pool: &SqlitePool, id: i64, update: &UserUpdate) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE users
         SET first_name = COALESCE(?, first_name),
             last_name  = COALESCE(?, last_name),
             email      = COALESCE(?, email)
         WHERE id = ?",
    )
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.email)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// All users, newest first — the admin panel listing.
pub async fn list_users(pool: &SqlitePool) -> sqlx::Result<Vec<UserRecord>> {
    let rows = sqlx::query(
        "SELECT id, first_name, last_name, email, role, created_at, last_login
         FROM users ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(record_from_row).collect())
}

/// Update last_login timestamp
pub async fn update_last_login(pool: &SqlitePool, user_id: i64) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(get_timestamp())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

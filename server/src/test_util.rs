//! Helpers shared by the unit-test modules.

use std::sync::Arc;

use shared::config::LiveConfig;
use shared::types::server_config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};

use crate::AppState;
use crate::auth::jwt::JwtKeys;
use crate::database;
use crate::database::users::NewUser;
use crate::database::utils::hash_password;

pub const TEST_SECRET: &str = "unit-test-secret-0123456789abcdef";

pub async fn test_state() -> AppState {
    let db = database::connect_in_memory().await.unwrap();
    let config = LiveConfig::new(AppConfig {
        server: ServerConfig {
            bind: "127.0.0.1".to_string(),
            port: 0,
            max_connections: 16,
            production: false,
        },
        database: DatabaseConfig {
            path: ":memory:".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: Some(TEST_SECRET.to_string()),
        },
    });

    AppState {
        db,
        config,
        jwt: Arc::new(JwtKeys::new(TEST_SECRET)),
    }
}

pub async fn seed_user(state: &AppState, email: &str, password: &str) -> i64 {
    database::users::create_user(
        &state.db,
        NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
        },
    )
    .await
    .unwrap()
}

/// Flip an existing account to ADMIN, the same way operations does it:
/// directly on the users table.
pub async fn promote_to_admin(state: &AppState, id: i64) {
    sqlx::query("UPDATE users SET role = 'ADMIN' WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .unwrap();
}

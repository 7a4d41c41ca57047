use std::sync::Arc;

use shared::config::LiveConfig;
use sqlx::SqlitePool;

pub mod auth;
pub mod database;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_util;

use crate::auth::jwt::JwtKeys;

/// Shared application state, cloned into every connection task.
///
/// The signing keys are built once at startup from the resolved secret and
/// never rotated at runtime; the config behind [`LiveConfig`] may be
/// hot-reloaded on SIGHUP.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: LiveConfig,
    pub jwt: Arc<JwtKeys>,
}

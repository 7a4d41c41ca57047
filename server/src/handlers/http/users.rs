use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

use shared::types::ErrorResponse;
use shared::types::jwt::Claims;

use crate::AppState;
use crate::database::{users as db_users, utils as db_utils};
use crate::handlers::http::utils::deliver_serialized_json;

/// Partial profile update body (camelCase from the browser client).
#[derive(Debug, Deserialize)]
pub struct UpdateUserData {
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Row-level authorization: a plain user may only touch their own row;
/// administrators may touch any.  This is the single place the rule lives
/// for the profile endpoints.
fn may_access(claims: &Claims, user_id: i64) -> bool {
    claims.role.is_admin() || claims.id == user_id
}

/// Target user id from a `/api/users/:id` path.
fn parse_user_id(path: &str) -> Option<i64> {
    path.split('?')
        .next()
        .unwrap_or(path)
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

/// GET /api/users/:id
pub async fn handle_get_user(
    req: Request<IncomingBody>,
    state: AppState,
    claims: Claims,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let Some(user_id) = parse_user_id(req.uri().path()) else {
        return deliver_serialized_json(
            &ErrorResponse::new("INVALID_ID", "User id must be a number"),
            StatusCode::BAD_REQUEST,
        );
    };

    if !may_access(&claims, user_id) {
        warn!(
            "User {} attempted to read profile of user {}",
            claims.id, user_id
        );
        return deliver_serialized_json(&ErrorResponse::forbidden(), StatusCode::FORBIDDEN);
    }

    let user = db_users::get_user_by_id(&state.db, user_id)
        .await
        .context("Database error fetching user")?;

    match user {
        Some(user) => deliver_serialized_json(&user, StatusCode::OK),
        None => deliver_serialized_json(
            &ErrorResponse::new("USER_NOT_FOUND", "User not found"),
            StatusCode::NOT_FOUND,
        ),
    }
}

/// PUT /api/users/:id
///
/// The role column is not reachable from here — promotions are a separate,
/// deliberate operation, not a profile edit.
pub async fn handle_update_user(
    req: Request<IncomingBody>,
    state: AppState,
    claims: Claims,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let Some(user_id) = parse_user_id(req.uri().path()) else {
        return deliver_serialized_json(
            &ErrorResponse::new("INVALID_ID", "User id must be a number"),
            StatusCode::BAD_REQUEST,
        );
    };

    if !may_access(&claims, user_id) {
        warn!(
            "User {} attempted to update profile of user {}",
            claims.id, user_id
        );
        return deliver_serialized_json(&ErrorResponse::forbidden(), StatusCode::FORBIDDEN);
    }

    let body = req
        .collect()
        .await
        .context("Failed to read request body")?
        .to_bytes();

    let Ok(data) = serde_json::from_slice::<UpdateUserData>(&body) else {
        return deliver_serialized_json(
            &ErrorResponse::new("INVALID_BODY", "Malformed update body"),
            StatusCode::BAD_REQUEST,
        );
    };

    if let Err(response) = validate_update(&data) {
        return deliver_serialized_json(&response, StatusCode::BAD_REQUEST);
    }

    let update = db_users::UserUpdate {
        first_name: data.first_name.map(|s| db_utils::sanitize_string(&s)),
        last_name: data.last_name.map(|s| db_utils::sanitize_string(&s)),
        email: data.email.map(|s| s.trim().to_string()),
    };

    let updated = db_users::update_user(&state.db, user_id, &update)
        .await
        .context("Database error updating user")?;

    if !updated {
        return deliver_serialized_json(
            &ErrorResponse::new("USER_NOT_FOUND", "User not found"),
            StatusCode::NOT_FOUND,
        );
    }

    info!("User {} updated profile of user {}", claims.id, user_id);

    let user = db_users::get_user_by_id(&state.db, user_id)
        .await
        .context("Database error re-fetching user")?
        .context("Updated user row vanished")?;

    deliver_serialized_json(&user, StatusCode::OK)
}

fn validate_update(data: &UpdateUserData) -> std::result::Result<(), ErrorResponse> {
    for name in [&data.first_name, &data.last_name].into_iter().flatten() {
        if !db_utils::is_valid_name(name) {
            return Err(ErrorResponse::new(
                "INVALID_NAME",
                "Names must be at least 2 characters",
            ));
        }
    }

    if let Some(email) = &data.email {
        if !db_utils::is_valid_email(email.trim()) {
            return Err(ErrorResponse::new("INVALID_EMAIL", "Invalid email format"));
        }
    }

    Ok(())
}

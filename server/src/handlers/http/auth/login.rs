use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode, header};
use tracing::{error, info, warn};

use shared::types::jwt::Identity;
use shared::types::login::{LoginData, LoginError, LoginResponse};

use crate::AppState;
use crate::auth::jwt::TOKEN_TTL_SECS;
use crate::auth::session;
use crate::database::{users as db_users, utils as db_utils};
use crate::handlers::http::utils::deliver_serialized_json;

/// Main login handler
pub async fn handle_login(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing login request");

    let login_data = match parse_login_json(req).await {
        Ok(data) => data,
        Err(login_error) => {
            warn!("Login parsing failed: {:?}", login_error.to_code());
            return deliver_serialized_json(&login_error.to_response(), StatusCode::BAD_REQUEST);
        }
    };

    if let Err(login_error) = validate_login(&login_data) {
        warn!("Login validation failed: {:?}", login_error.to_code());
        return deliver_serialized_json(&login_error.to_response(), StatusCode::BAD_REQUEST);
    }

    let identity = match attempt_login(&login_data, &state).await {
        Ok(identity) => identity,
        Err(login_error) => {
            warn!("Login failed: {:?}", login_error.to_code());
            return deliver_serialized_json(&login_error.to_response(), StatusCode::UNAUTHORIZED);
        }
    };

    info!(
        "User logged in successfully: {} (ID: {})",
        identity.email, identity.id
    );

    let secure = state.config.read().await.server.production;
    let cookie = session::create_session(&state.jwt, &identity, secure)
        .context("Failed to create session")?;

    let response_data = LoginResponse::Success {
        user_id: identity.id,
        email: identity.email.clone(),
        role: identity.role,
        expires_in: TOKEN_TTL_SECS as u64,
        message: "Login successful".to_string(),
        redirect: "/".to_string(),
    };

    let json = serde_json::to_string(&response_data).context("Failed to serialize response")?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::SET_COOKIE, cookie)
        .body(http_body_util::Full::new(Bytes::from(json)).boxed())
        .context("Failed to build response")?;

    Ok(response)
}

/// Parse the JSON request body
async fn parse_login_json(
    req: Request<IncomingBody>,
) -> std::result::Result<LoginData, LoginError> {
    let body = req
        .collect()
        .await
        .map_err(|_| LoginError::InternalError)?
        .to_bytes();

    serde_json::from_slice(&body).map_err(|_| LoginError::MissingField("email".to_string()))
}

/// Validate login data
fn validate_login(data: &LoginData) -> std::result::Result<(), LoginError> {
    if data.email.trim().is_empty() {
        return Err(LoginError::MissingField("email".to_string()));
    }

    if data.password.is_empty() {
        return Err(LoginError::MissingField("password".to_string()));
    }

    Ok(())
}

/// Verify the credentials against the user store.
///
/// Unknown email and wrong password both produce `InvalidCredentials`; the
/// caller must not be able to probe which emails are registered.
pub async fn attempt_login(
    data: &LoginData,
    state: &AppState,
) -> std::result::Result<Identity, LoginError> {
    info!("Attempting login for: {}", data.email);

    let user_auth = db_users::get_user_auth(&state.db, data.email.trim())
        .await
        .map_err(|e| {
            error!("Database error getting user auth: {}", e);
            LoginError::DatabaseError
        })?
        .ok_or(LoginError::InvalidCredentials)?;

    let password_valid =
        db_utils::verify_password(&user_auth.password_hash, &data.password).map_err(|e| {
            error!("Password verification error: {}", e);
            LoginError::InternalError
        })?;

    if !password_valid {
        warn!("Invalid password for: {}", data.email);
        return Err(LoginError::InvalidCredentials);
    }

    db_users::update_last_login(&state.db, user_auth.id)
        .await
        .map_err(|e| {
            // Don't fail login for this.
            error!("Failed to update last login: {}", e);
        })
        .ok();

    Ok(Identity {
        id: user_auth.id,
        email: user_auth.email,
        role: user_auth.role,
    })
}

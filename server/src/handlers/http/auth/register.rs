use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode, header};
use tracing::{error, info, warn};

use shared::types::jwt::{Identity, Role};
use shared::types::register::{RegistrationData, RegistrationError, RegistrationResponse};

use crate::AppState;
use crate::auth::session;
use crate::database::{users as db_users, utils as db_utils};
use crate::handlers::http::utils::deliver_serialized_json;

/// Main registration handler.  A successful registration logs the new user
/// straight in: the 201 response already carries the session cookie.
pub async fn handle_register(
    req: Request<IncomingBody>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("Processing registration request");

    let registration = match parse_registration_json(req).await {
        Ok(data) => data,
        Err(err) => {
            warn!("Registration parsing failed: {:?}", err.to_code());
            return deliver_serialized_json(&err.to_response(), StatusCode::BAD_REQUEST);
        }
    };

    if let Err(err) = validate_registration(&registration) {
        warn!("Registration validation failed: {:?}", err.to_code());
        return deliver_serialized_json(&err.to_response(), StatusCode::BAD_REQUEST);
    }

    let identity = match attempt_register(&registration, &state).await {
        Ok(identity) => identity,
        Err(err) => {
            warn!("Registration failed: {:?}", err.to_code());
            let status = match err {
                RegistrationError::EmailTaken => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            };
            return deliver_serialized_json(&err.to_response(), status);
        }
    };

    info!(
        "User registered successfully: {} (ID: {})",
        identity.email, identity.id
    );

    let secure = state.config.read().await.server.production;
    let cookie = session::create_session(&state.jwt, &identity, secure)
        .context("Failed to create session")?;

    let response_data = RegistrationResponse::Success {
        user_id: identity.id,
        email: identity.email.clone(),
        role: identity.role,
        message: "User registered successfully".to_string(),
        redirect: "/".to_string(),
    };

    let json = serde_json::to_string(&response_data).context("Failed to serialize response")?;

    let response = Response::builder()
        .status(StatusCode::CREATED)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::SET_COOKIE, cookie)
        .body(http_body_util::Full::new(Bytes::from(json)).boxed())
        .context("Failed to build response")?;

    Ok(response)
}

/// Parse the JSON request body
async fn parse_registration_json(
    req: Request<IncomingBody>,
) -> std::result::Result<RegistrationData, RegistrationError> {
    let body = req
        .collect()
        .await
        .map_err(|_| RegistrationError::InternalError)?
        .to_bytes();

    serde_json::from_slice(&body)
        .map_err(|_| RegistrationError::MissingField("email".to_string()))
}

/// Validate registration data
fn validate_registration(data: &RegistrationData) -> std::result::Result<(), RegistrationError> {
    if !db_utils::is_valid_name(&data.first_name) || !db_utils::is_valid_name(&data.last_name) {
        return Err(RegistrationError::InvalidName);
    }

    if !db_utils::is_valid_email(data.email.trim()) {
        return Err(RegistrationError::InvalidEmail);
    }

    if !db_utils::is_valid_password(&data.password) {
        return Err(RegistrationError::InvalidPassword);
    }

    Ok(())
}

/// Create the account and return the identity to start a session for.
/// New accounts are always plain USERs.
pub async fn attempt_register(
    data: &RegistrationData,
    state: &AppState,
) -> std::result::Result<Identity, RegistrationError> {
    let email = data.email.trim().to_string();

    let taken = db_users::email_exists(&state.db, &email).await.map_err(|e| {
        error!("Database error checking email: {}", e);
        RegistrationError::DatabaseError
    })?;

    if taken {
        warn!("Registration with already-used email: {}", email);
        return Err(RegistrationError::EmailTaken);
    }

    let password_hash = db_utils::hash_password(&data.password).map_err(|e| {
        error!("Password hashing error: {}", e);
        RegistrationError::InternalError
    })?;

    let user_id = db_users::create_user(
        &state.db,
        db_users::NewUser {
            first_name: db_utils::sanitize_string(&data.first_name),
            last_name: db_utils::sanitize_string(&data.last_name),
            email: email.clone(),
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        // The UNIQUE(email) constraint may still fire on a concurrent
        // duplicate registration that slipped past the pre-check.
        error!("Failed to create user: {}", e);
        RegistrationError::DatabaseError
    })?;

    Ok(Identity {
        id: user_id,
        email,
        role: Role::User,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::http::auth::login;
    use crate::test_util::test_state;
    use shared::types::login::LoginData;

    fn registration(email: &str) -> RegistrationData {
        RegistrationData {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn registration_creates_a_user_account() {
        let state = test_state().await;

        let identity = attempt_register(&registration("a@x.com"), &state)
            .await
            .ok()
            .unwrap();

        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.role, Role::User);

        // The freshly created account can log in with its password.
        let logged_in = login::attempt_login(
            &LoginData {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            },
            &state,
        )
        .await
        .ok()
        .unwrap();
        assert_eq!(logged_in.id, identity.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let state = test_state().await;
        attempt_register(&registration("a@x.com"), &state)
            .await
            .ok()
            .unwrap();

        let err = attempt_register(&registration("a@x.com"), &state)
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_code(), "EMAIL_TAKEN");
    }

    #[test]
    fn validation_catches_bad_inputs() {
        let mut bad_name = registration("a@x.com");
        bad_name.first_name = "A".to_string();
        assert!(validate_registration(&bad_name).is_err());

        let mut bad_email = registration("not-an-email");
        bad_email.email = "not-an-email".to_string();
        assert!(validate_registration(&bad_email).is_err());

        let mut bad_password = registration("a@x.com");
        bad_password.password = "12345".to_string();
        assert!(validate_registration(&bad_password).is_err());

        assert!(validate_registration(&registration("a@x.com")).is_ok());
    }

    #[test]
    fn camel_case_body_is_accepted() {
        let data: RegistrationData = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"a@x.com","password":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(data.first_name, "Ada");
        assert_eq!(data.last_name, "Lovelace");
    }
}

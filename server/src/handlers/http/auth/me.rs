use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::info;

use shared::types::ErrorResponse;
use shared::types::jwt::Claims;

use crate::AppState;
use crate::auth::session;
use crate::database::users as db_users;
use crate::handlers::http::utils::deliver_serialized_json;

/// GET /api/auth/me — the signed-in user's own profile.
///
/// Reads the session from the cookie itself instead of the claims the
/// router forwards; the two always agree when the gate is wired in front.
pub async fn handle_me(
    req: Request<IncomingBody>,
    state: AppState,
    _claims: Claims,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let Some(session) = session::read_session(req.headers(), &state.jwt) else {
        return deliver_serialized_json(
            &ErrorResponse::unauthenticated(),
            StatusCode::UNAUTHORIZED,
        );
    };

    info!("Serving profile for user {}", session.id);

    let user = db_users::get_user_by_id(&state.db, session.id)
        .await
        .context("Database error fetching profile")?;

    match user {
        Some(user) => deliver_serialized_json(&user, StatusCode::OK),
        // The token outlived the account (deleted since issue).
        None => deliver_serialized_json(
            &ErrorResponse::new("USER_NOT_FOUND", "User not found"),
            StatusCode::NOT_FOUND,
        ),
    }
}

use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode, header};
use tracing::info;

use crate::AppState;
use crate::auth::session;

/// Handle logout.
///
/// Overwrites the session cookie with an expired empty value.  Idempotent:
/// a request without any session gets the same 200 — there is nothing
/// server-side to tear down, the cookie is the whole session.
pub async fn handle_logout(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    info!("User logged out");

    let clear_cookie = session::clear_session().context("Failed to clear session")?;

    let response_json = serde_json::json!({
        "status": "success",
        "message": "Logged out successfully"
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::SET_COOKIE, clear_cookie)
        .body(Full::new(Bytes::from(response_json.to_string())).boxed())
        .context("Failed to build logout response")?;

    Ok(response)
}

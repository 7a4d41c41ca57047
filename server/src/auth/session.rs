use std::time::Duration;

use anyhow::{Context, Result};
use http::{HeaderMap, HeaderValue};
use tracing::debug;

use shared::types::jwt::{Claims, Identity};

use crate::auth::jwt::{JwtKeys, TOKEN_TTL_SECS};
use crate::handlers::http::utils::headers::{get_cookie, set_cookie};

/// Name of the session cookie carried by every authenticated browser.
pub const SESSION_COOKIE: &str = "token";

/// Create a session for a freshly authenticated identity and return the
/// `Set-Cookie` header value binding it to the browser.
///
/// The cookie is HTTP-only (no script access), site-wide, and expires with
/// the token (7 days).  `secure` should be true in production so the cookie
/// only travels over TLS.  Replaces any previous session wholesale — there
/// is nothing server-side to update.
pub fn create_session(keys: &JwtKeys, identity: &Identity, secure: bool) -> Result<HeaderValue> {
    let token = keys.sign(identity)?;
    debug!("Session created for user {}", identity.id);

    set_cookie(
        SESSION_COOKIE,
        &token,
        Some(Duration::from_secs(TOKEN_TTL_SECS as u64)),
        Some("/"),
        true,
        secure,
    )
    .context("Failed to build session cookie")
}

/// Read the session from an incoming request's headers.
///
/// No cookie means unauthenticated — `None`, not an error.  A present
/// cookie is delegated to token verification, which likewise signals
/// tampered/expired/malformed tokens as `None`.
pub fn read_session(headers: &HeaderMap, keys: &JwtKeys) -> Option<Claims> {
    let token = get_cookie(headers, SESSION_COOKIE)?;
    keys.verify(&token)
}

/// Overwrite the session cookie with an empty, already-expired value so the
/// client discards it on the next response.  Idempotent: clearing a session
/// that does not exist is a no-op from the caller's perspective.
///
/// Note this only removes the client's copy — an already-issued token stays
/// cryptographically valid until its natural expiry, since no server-side
/// session store exists to revoke it from.
pub fn clear_session() -> Result<HeaderValue> {
    set_cookie(
        SESSION_COOKIE,
        "",
        Some(Duration::ZERO),
        Some("/"),
        true,
        false,
    )
    .context("Failed to build session-clearing cookie")
}

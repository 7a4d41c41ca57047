pub mod admin;
pub mod auth;
pub mod pages;
pub mod routes;
pub mod users;
pub mod utils;

use std::convert::Infallible;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::{Request, Response};
use tracing::info;

use crate::AppState;
use crate::auth::gate::{self, Decision};
use crate::auth::session::SESSION_COOKIE;
use crate::handlers::http::routes::Router;
use crate::handlers::http::utils::{deliver_redirect, get_cookie};

/// Single entry point for every request on every connection.
///
/// The gatekeeper classifies the request first; only an `Allow` outcome
/// ever reaches the route table (and through it, any data access).  The
/// redirect emission below is the whole HTTP adapter around the pure
/// decision function.
pub async fn handle_request(
    router: &Router,
    req: Request<hyper::body::Incoming>,
    state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    let token = get_cookie(req.headers(), SESSION_COOKIE);

    match gate::evaluate(req.uri().path(), token.as_deref(), &state.jwt) {
        Decision::Redirect(target) => {
            info!(
                "Gate redirected {} {} to {}",
                req.method(),
                req.uri().path(),
                target.path()
            );
            deliver_redirect(target.path())
        }
        Decision::Allow(claims) => router.route(req, state, claims).await,
    }
}

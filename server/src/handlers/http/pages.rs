use std::convert::Infallible;

use anyhow::Result;
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use crate::AppState;
use crate::handlers::http::utils::{deliver_html, deliver_serialized_json};

// Placeholder documents: the real UI is rendered by the separate frontend,
// these only exist so the gatekeeper's redirect targets resolve.

const HOME_PAGE: &str = "<!doctype html>\n<title>Activities</title>\n<h1>Activities</h1>\n<p>Browse activities and manage your bookings.</p>\n";

const LOGIN_PAGE: &str = "<!doctype html>\n<title>Log in</title>\n<h1>Log in</h1>\n<p>POST your credentials to <code>/api/auth/login</code>.</p>\n";

const REGISTER_PAGE: &str = "<!doctype html>\n<title>Register</title>\n<h1>Register</h1>\n<p>POST your details to <code>/api/auth/register</code>.</p>\n";

const UNAUTHORIZED_PAGE: &str = "<!doctype html>\n<title>Unauthorized</title>\n<h1>Unauthorized</h1>\n<p>Your account does not have access to that page.</p>\n";

const ADMIN_PAGE: &str = "<!doctype html>\n<title>Administration</title>\n<h1>Administration</h1>\n<p>User management lives at <code>/api/admin/users</code>.</p>\n";

pub async fn handle_home(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_html(StatusCode::OK, HOME_PAGE)
}

pub async fn handle_login_page(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_html(StatusCode::OK, LOGIN_PAGE)
}

pub async fn handle_register_page(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_html(StatusCode::OK, REGISTER_PAGE)
}

pub async fn handle_unauthorized_page(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_html(StatusCode::OK, UNAUTHORIZED_PAGE)
}

pub async fn handle_admin_page(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_html(StatusCode::OK, ADMIN_PAGE)
}

/// Liveness probe
pub async fn handle_health(
    _req: Request<IncomingBody>,
    _state: AppState,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    deliver_serialized_json(&json!({ "status": "ok" }), StatusCode::OK)
}

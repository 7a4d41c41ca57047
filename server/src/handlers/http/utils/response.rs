use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::header::HeaderValue;
use hyper::{Response, StatusCode, header};
use tracing::debug;

/// Emit a browser redirect.  307 preserves the request method, matching the
/// behavior the frontend was built against.
pub fn deliver_redirect(location: &str) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    debug!("Redirecting to {}", location);

    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header(header::LOCATION, location)
        .body(Full::new(Bytes::new()).boxed())
        .context("Failed to build redirect response")
}

/// Deliver a small inline HTML document.
pub fn deliver_html(
    status: StatusCode,
    body: &'static str,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Full::new(Bytes::from_static(body.as_bytes())).boxed())
        .context("Failed to build HTML response")
}

/// Last-resort 500 — built from static parts so it cannot itself fail.
pub fn internal_error_response() -> Response<BoxBody<Bytes, Infallible>> {
    let body = Bytes::from_static(
        br#"{"status":"error","code":"INTERNAL_ERROR","message":"An internal error occurred"}"#,
    );

    let mut response = Response::new(Full::new(body).boxed());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    response
}

use std::convert::Infallible;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::body::Incoming as IncomingBody;
use hyper::{Request, Response, StatusCode};
use tracing::{info, warn};

use shared::types::ErrorResponse;
use shared::types::jwt::Claims;

use crate::AppState;
use crate::database::users as db_users;
use crate::handlers::http::utils::deliver_serialized_json;

/// GET /api/admin/users
///
/// The gatekeeper rejects non-admin sessions for every `/api/admin/…`
/// path before dispatch; the role check below must agree with it.
pub async fn handle_list_users(
    _req: Request<IncomingBody>,
    state: AppState,
    claims: Claims,
) -> Result<Response<BoxBody<Bytes, Infallible>>> {
    if !claims.role.is_admin() {
        warn!("Non-admin user {} attempted an admin operation", claims.id);
        return deliver_serialized_json(&ErrorResponse::forbidden(), StatusCode::FORBIDDEN);
    }

    info!("Serving user list for admin {}", claims.id);

    let users = db_users::list_users(&state.db)
        .await
        .context("Database error listing users")?;

    deliver_serialized_json(&users, StatusCode::OK)
}

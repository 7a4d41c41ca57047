use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::{Method, Request, Response, StatusCode};
use tracing::warn;

use shared::types::jwt::Claims;

use crate::AppState;
use crate::handlers::http::utils::deliver_error_json;
use crate::handlers::http::{admin, auth, pages, users};

// ---------------------------------------------------------------------------
// Handler type aliases
// ---------------------------------------------------------------------------
//
// Authorization is enforced by the gatekeeper BEFORE dispatch ever reaches
// this router — by the time `route` runs, redirects have already happened.
// The two tiers only differ in what the handler receives:
//
//   RouteHandler  — (req, state).  Public pages and the auth endpoints.
//
//   AuthedHandler — (req, state, claims).  The gatekeeper verified the
//                   session and forwards the claims so the handler can make
//                   row-level authorization decisions.

type RouteHandler = Box<
    dyn Fn(
            Request<hyper::body::Incoming>,
            AppState,
        )
            -> Pin<Box<dyn Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send>>
        + Send
        + Sync,
>;

type AuthedHandler = Box<
    dyn Fn(
            Request<hyper::body::Incoming>,
            AppState,
            Claims,
        )
            -> Pin<Box<dyn Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send>>
        + Send
        + Sync,
>;

enum RouteKind {
    /// Handler does not need an identity (the path may still be protected
    /// by the gatekeeper — e.g. `/`, where any valid session passes).
    Open(RouteHandler),

    /// Handler receives the verified claims forwarded by the gatekeeper.
    Authed(AuthedHandler),
}

struct Route {
    method: Method,
    path: String,
    kind: RouteKind,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub struct Router {
    routes: Vec<Route>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes_count", &self.routes.len())
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    // ── Open (no claims) ─────────────────────────────────────────────────────

    pub fn get<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::GET,
            path: path.to_string(),
            kind: RouteKind::Open(Box::new(move |req, state| Box::pin(handler(req, state)))),
        });
        self
    }

    pub fn post<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::POST,
            path: path.to_string(),
            kind: RouteKind::Open(Box::new(move |req, state| Box::pin(handler(req, state)))),
        });
        self
    }

    // ── Authed (claims forwarded by the gatekeeper) ──────────────────────────

    pub fn get_authed<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, Claims) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::GET,
            path: path.to_string(),
            kind: RouteKind::Authed(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    pub fn put_authed<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(Request<hyper::body::Incoming>, AppState, Claims) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response<BoxBody<Bytes, Infallible>>>> + Send + 'static,
    {
        self.routes.push(Route {
            method: Method::PUT,
            path: path.to_string(),
            kind: RouteKind::Authed(Box::new(move |req, state, claims| {
                Box::pin(handler(req, state, claims))
            })),
        });
        self
    }

    // ── Dispatch ─────────────────────────────────────────────────────────────

    pub async fn route(
        &self,
        req: Request<hyper::body::Incoming>,
        state: AppState,
        claims: Option<Claims>,
    ) -> Result<Response<BoxBody<Bytes, Infallible>>> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        for route in &self.routes {
            if route.method != method || !Self::path_matches(&route.path, &path) {
                continue;
            }

            return match &route.kind {
                RouteKind::Open(h) => h(req, state).await,

                RouteKind::Authed(h) => match claims {
                    Some(claims) => h(req, state, claims).await,
                    // Only reachable if a claims-requiring route is mapped
                    // onto a public path — a wiring mistake, not user error.
                    None => {
                        warn!("Authed route {} {} hit without claims", method, path);
                        deliver_error_json(
                            "UNAUTHORIZED",
                            "Authentication required",
                            StatusCode::UNAUTHORIZED,
                        )
                    }
                },
            };
        }

        deliver_error_json("NOT_FOUND", "Endpoint not found", StatusCode::NOT_FOUND)
            .context("Failed to deliver 404 response")
    }

    // ── Path matching ────────────────────────────────────────────────────────

    pub fn path_matches(route_path: &str, request_path: &str) -> bool {
        // Strip query string from incoming request path before comparing.
        let clean = request_path.split('?').next().unwrap_or(request_path);

        // Exact match.
        if route_path == clean {
            return true;
        }

        // Segment-by-segment matching for `:param` wildcards.
        // e.g.  "/api/users/:id"  matches  "/api/users/42"
        let route_segs: Vec<&str> = route_path.split('/').collect();
        let path_segs: Vec<&str> = clean.split('/').collect();

        if route_segs.len() != path_segs.len() {
            return false;
        }

        route_segs
            .iter()
            .zip(path_segs.iter())
            .all(|(r, p)| r.starts_with(':') || r == p)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// The application's full route table.
pub fn build_router() -> Router {
    Router::new()
        // Pages (placeholders — rendering happens client-side).
        .get("/", pages::handle_home)
        .get("/login", pages::handle_login_page)
        .get("/register", pages::handle_register_page)
        .get("/unauthorized", pages::handle_unauthorized_page)
        .get("/admin", pages::handle_admin_page)
        .get("/health", pages::handle_health)
        // Session lifecycle.
        .post("/api/auth/login", auth::handle_login)
        .post("/api/auth/register", auth::handle_register)
        .post("/api/auth/logout", auth::handle_logout)
        .get_authed("/api/auth/me", auth::handle_me)
        // Profiles, owner-or-admin.
        .get_authed("/api/users/:id", users::handle_get_user)
        .put_authed("/api/users/:id", users::handle_update_user)
        // Admin panel.
        .get_authed("/api/admin/users", admin::users::handle_list_users)
}

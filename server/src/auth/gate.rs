use shared::types::jwt::Claims;

use crate::auth::jwt::JwtKeys;

/// Paths reachable without a session.  The page targets of both redirects
/// must be here, or a redirect would loop; the auth API endpoints must be
/// here so a browser with a stale cookie can still log in or out.
const PUBLIC_PATHS: &[&str] = &[
    "/login",
    "/register",
    "/unauthorized",
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/logout",
    "/health",
];

/// Outcome of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Forward to the router.  Claims are present for every authenticated
    /// request; public paths pass with `None`.
    Allow(Option<Claims>),

    /// Short-circuit before any route dispatch or data access.
    Redirect(Target),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Not authenticated (cookie absent or failed verification).
    Login,
    /// Authenticated, but the role does not grant access to the path.
    /// Deliberately distinct from `Login` so a signed-in user is not
    /// bounced into re-authenticating over a permissions problem.
    Unauthorized,
}

impl Target {
    pub fn path(&self) -> &'static str {
        match self {
            Target::Login => "/login",
            Target::Unauthorized => "/unauthorized",
        }
    }
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Admin-scoped paths are matched per segment: `/admin`, `/admin/users`,
/// `/api/admin/…` — but not `/administrator`.
pub fn is_admin_scoped(path: &str) -> bool {
    path == "/admin"
        || path.starts_with("/admin/")
        || path == "/api/admin"
        || path.starts_with("/api/admin/")
}

/// Classify one request before any route handler runs.
///
/// Pure and stateless: the outcome is a deterministic function of the
/// request path, the cookie value and the current time (which enters only
/// through token expiry).  First matching rule wins:
///
/// 1. public path                         → pass
/// 2. no cookie                           → redirect to login
/// 3. cookie fails verification           → redirect to login (identical to
///    rule 2 on the outside — why it failed is never revealed)
/// 4. admin-scoped path, non-admin role   → redirect to the unauthorized page
/// 5. otherwise                           → pass, claims forwarded so
///    handlers can make row-level authorization decisions
pub fn evaluate(path: &str, token: Option<&str>, keys: &JwtKeys) -> Decision {
    // Rules act on the path alone; ignore any query string.
    let path = path.split('?').next().unwrap_or(path);

    if is_public(path) {
        return Decision::Allow(None);
    }

    let Some(token) = token else {
        return Decision::Redirect(Target::Login);
    };

    let Some(claims) = keys.verify(token) else {
        return Decision::Redirect(Target::Login);
    };

    if is_admin_scoped(path) && !claims.role.is_admin() {
        return Decision::Redirect(Target::Unauthorized);
    }

    Decision::Allow(Some(claims))
}

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Closed role set for the booking platform.
///
/// External inputs (token claims, JSON bodies, database rows) historically
/// carried the role in mixed case (`"admin"` vs `"ADMIN"`).  Parsing happens
/// exactly once, here, case-insensitively — downstream code matches on the
/// enum and never compares raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Canonicalizing parse.  Accepts any casing; unknown strings are `None`.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Canonical wire form, always uppercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("unknown role: {:?}", s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| de::Error::custom(format!("unknown role: {:?}", raw)))
    }
}

// ---------------------------------------------------------------------------
// Identity and claims
// ---------------------------------------------------------------------------

/// An authenticated identity, as established by the login/registration
/// handlers after credential verification.  This is the input to session
/// creation; it never carries the password or its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

/// Claims embedded in every session token issued by the server.
///
/// The token is the full session state — there is no server-side session
/// store.  Verifying the signature and expiry is sufficient to trust these
/// fields; no database read is needed to authenticate a request.
///
/// A consequence worth knowing: a promoted/demoted user keeps their old
/// `role` until they log in again, and logout cannot invalidate a token
/// that was captured beforehand (it simply expires).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user ID (matches `users.id`).
    pub id: i64,

    /// Email at login time — display/lookup convenience, not security data.
    pub email: String,

    /// Role embedded at login time so authorization needs no DB query.
    pub role: Role,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: usize,

    /// Expiry (Unix timestamp, seconds) — always `iat` + 7 days.
    pub exp: usize,
}

impl Claims {
    /// The identity these claims vouch for.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use shared::types::jwt::{Claims, Identity};

/// Fixed token lifetime: 7 days.  The cookie `Max-Age` mirrors this value.
pub const TOKEN_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// HMAC-SHA256 signing/verification keys, built once at startup from the
/// resolved secret and injected wherever tokens are produced or checked.
/// Constructing per-test instances with distinct secrets is cheap.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    /// Build keys from the signing secret.
    ///
    /// Secret presence and length are validated by the config loader before
    /// this is ever called — the process refuses to start without one.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Strict expiry: zero leeway.  The crate defaults to 60s of
        // clock-skew tolerance; expiry here is exact.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for a freshly authenticated identity.
    /// Claims carry `iat = now` and `exp = now + 7 days`.
    pub fn sign(&self, identity: &Identity) -> Result<String> {
        self.sign_at(identity, unix_now())
    }

    /// Sign with an explicit issued-at instant.  Expiry is always
    /// `issued_at + TOKEN_TTL_SECS`; there is no way to mint a token with a
    /// different lifetime.
    pub fn sign_at(&self, identity: &Identity, issued_at: usize) -> Result<String> {
        let claims = Claims {
            id: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("Failed to sign session token")
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed structure, signature mismatch and expiry all come back as
    /// `None` — routine traffic, not errors.  Callers must not distinguish
    /// the three cases towards the client (no oracle).  Signature comparison
    /// is constant-time inside the HMAC verification.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                // Logged at debug only; the reason never reaches a response.
                debug!("Session token rejected: {}", err);
                None
            }
        }
    }
}

/// Current Unix timestamp in seconds.
pub fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared::types::jwt::Role;

    const SECRET: &str = "unit-test-secret-0123456789abcdef";

    fn keys() -> JwtKeys {
        JwtKeys::new(SECRET)
    }

    fn identity() -> Identity {
        Identity {
            id: 42,
            email: "a@x.com".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn sign_then_verify_round_trips_claims() {
        let keys = keys();
        let token = keys.sign(&identity()).unwrap();
        let claims = keys.verify(&token).expect("fresh token must verify");

        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECS);
        assert_eq!(claims.identity(), identity());
    }

    #[test]
    fn token_near_expiry_still_verifies() {
        let keys = keys();
        // Issued almost 7 days ago — one minute of validity left.
        let issued_at = unix_now() - TOKEN_TTL_SECS + 60;
        let token = keys.sign_at(&identity(), issued_at).unwrap();
        assert!(keys.verify(&token).is_some());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let issued_at = unix_now() - TOKEN_TTL_SECS - 1;
        let token = keys.sign_at(&identity(), issued_at).unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtKeys::new("another-secret-0123456789abcdef!")
            .sign(&identity())
            .unwrap();
        assert!(keys().verify(&token).is_none());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let keys = keys();
        assert!(keys.verify("").is_none());
        assert!(keys.verify("not-a-token").is_none());
        assert!(keys.verify("a.b").is_none());
        assert!(keys.verify("a.b.c.d").is_none());
        assert!(keys.verify("%%%.%%%.%%%").is_none());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = keys();
        let token = keys.sign(&identity()).unwrap();
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        // Swap the first payload character for a different base64url one.
        let first = parts[1].remove(0);
        let forged = if first == 'A' { 'B' } else { 'A' };
        parts[1].insert(0, forged);
        assert!(keys.verify(&parts.join(".")).is_none());
    }

    proptest! {
        /// Flipping any character of the signature segment to a different
        /// base64url character must invalidate the token.
        #[test]
        fn any_signature_mutation_is_rejected(pos in 0usize..256, replacement in 0usize..64) {
            const ALPHABET: &[u8] =
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

            let keys = keys();
            let token = keys.sign(&identity()).unwrap();
            let sig_start = token.rfind('.').unwrap() + 1;
            let sig_len = token.len() - sig_start;

            let index = sig_start + pos % sig_len;
            let original = token.as_bytes()[index];
            let mut mutated = ALPHABET[replacement];
            if mutated == original {
                // Pick the next alphabet character so the token really changes.
                mutated = ALPHABET[(replacement + 1) % ALPHABET.len()];
            }

            let mut bytes = token.clone().into_bytes();
            bytes[index] = mutated;
            let forged = String::from_utf8(bytes).unwrap();

            prop_assert!(keys.verify(&forged).is_none());
        }
    }
}

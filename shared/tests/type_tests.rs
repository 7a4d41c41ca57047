/// Integration-level tests for the `shared` crate.
///
/// Each section tests one module; unit tests that are tightly coupled to
/// private helpers live inside the modules themselves (see `#[cfg(test)]`
/// blocks in `jwt.rs` and `config.rs`).
// ---------------------------------------------------------------------------
// Claims / Role
// ---------------------------------------------------------------------------
#[cfg(test)]
mod jwt_tests {
    use shared::types::*;

    fn sample_claims() -> Claims {
        Claims {
            id: 42,
            email: "alice@example.com".to_string(),
            role: Role::User,
            iat: 1_700_000_000,
            exp: 1_700_604_800,
        }
    }

    #[test]
    fn claims_serialize_and_deserialize_roundtrip() {
        let c = sample_claims();
        let json = serde_json::to_string(&c).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn claims_json_contains_expected_keys() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        for key in &["id", "email", "role", "iat", "exp"] {
            assert!(json.get(key).is_some(), "missing key: {}", key);
        }
    }

    #[test]
    fn role_is_wire_encoded_uppercase() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        assert_eq!(json["role"], "USER");

        let mut admin = sample_claims();
        admin.role = Role::Admin;
        let json = serde_json::to_value(admin).unwrap();
        assert_eq!(json["role"], "ADMIN");
    }

    #[test]
    fn lowercase_role_literals_still_deserialize() {
        // Legacy call sites used "admin"; the closed enum absorbs both.
        let json = r#"{"id":1,"email":"a@x.com","role":"admin","iat":0,"exp":1}"#;
        let c: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(c.role, Role::Admin);
    }

    #[test]
    fn unknown_role_literal_fails_to_deserialize() {
        let json = r#"{"id":1,"email":"a@x.com","role":"ROOT","iat":0,"exp":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn identity_extraction_preserves_fields() {
        let c = sample_claims();
        let identity = c.identity();
        assert_eq!(identity.id, c.id);
        assert_eq!(identity.email, c.email);
        assert_eq!(identity.role, c.role);
    }
}

// ---------------------------------------------------------------------------
// Login types
// ---------------------------------------------------------------------------

#[cfg(test)]
mod login_tests {
    use shared::types::*;

    #[test]
    fn login_data_deserializes_from_json() {
        let json = r#"{"email":"bob@example.com","password":"pass123"}"#;
        let d: LoginData = serde_json::from_str(json).unwrap();
        assert_eq!(d.email, "bob@example.com");
        assert_eq!(d.password, "pass123");
    }

    #[test]
    fn all_error_variants_have_non_empty_messages() {
        let variants: Vec<Box<dyn Fn() -> LoginError>> = vec![
            Box::new(|| LoginError::InvalidCredentials),
            Box::new(|| LoginError::MissingField("test".into())),
            Box::new(|| LoginError::DatabaseError),
            Box::new(|| LoginError::InternalError),
        ];
        for v in variants {
            let e = v();
            assert!(!e.to_code().is_empty());
            assert!(!e.to_message().is_empty());
        }
    }

    #[test]
    fn invalid_credentials_message_names_no_culprit() {
        // Must not disclose whether the email exists.
        let msg = LoginError::InvalidCredentials.to_message();
        assert!(!msg.to_lowercase().contains("not found"));
        assert!(!msg.to_lowercase().contains("unknown"));
    }

    #[test]
    fn login_error_response_is_serializable() {
        let r = LoginError::InvalidCredentials.to_response();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "INVALID_CREDENTIALS");
    }

    #[test]
    fn login_response_success_serializes_all_fields() {
        let r = LoginResponse::Success {
            user_id: 1,
            email: "alice@example.com".into(),
            role: Role::User,
            expires_in: 604_800,
            message: "ok".into(),
            redirect: "/".into(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["expires_in"], 604_800);
        assert_eq!(json["role"], "USER");
    }
}

// ---------------------------------------------------------------------------
// Register types
// ---------------------------------------------------------------------------

#[cfg(test)]
mod register_tests {
    use shared::types::*;

    #[test]
    fn all_register_error_codes_are_unique() {
        let codes = [
            RegistrationError::EmailTaken.to_code(),
            RegistrationError::InvalidName.to_code(),
            RegistrationError::InvalidPassword.to_code(),
            RegistrationError::InvalidEmail.to_code(),
            RegistrationError::MissingField("f".into()).to_code(),
            RegistrationError::DatabaseError.to_code(),
            RegistrationError::InternalError.to_code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "duplicate registration codes");
    }

    #[test]
    fn missing_field_message_includes_field_name() {
        let err = RegistrationError::MissingField("email".to_string());
        assert!(err.to_message().contains("email"));
    }

    #[test]
    fn register_error_response_serializes_correctly() {
        let r = RegistrationError::EmailTaken.to_response();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "EMAIL_TAKEN");
    }

    #[test]
    fn register_data_accepts_camel_and_snake_case() {
        let camel = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1"
        }"#;
        let d: RegistrationData = serde_json::from_str(camel).unwrap();
        assert_eq!(d.first_name, "Ada");

        let snake = r#"{
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "password": "secret1"
        }"#;
        let d: RegistrationData = serde_json::from_str(snake).unwrap();
        assert_eq!(d.last_name, "Lovelace");
    }

    #[test]
    fn register_response_success_has_redirect_field() {
        let r = RegistrationResponse::Success {
            user_id: 1,
            email: "ada@example.com".into(),
            role: Role::User,
            message: "ok".into(),
            redirect: "/".into(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["redirect"], "/");
        assert_eq!(json["status"], "success");
    }
}

// ---------------------------------------------------------------------------
// JSON error type
// ---------------------------------------------------------------------------

#[cfg(test)]
mod json_error_tests {
    use shared::types::*;

    #[test]
    fn error_response_new_sets_status_to_error() {
        let e = ErrorResponse::new("NOT_FOUND", "resource missing");
        assert_eq!(e.status, "error");
        assert_eq!(e.code, "NOT_FOUND");
        assert_eq!(e.message, "resource missing");
    }

    #[test]
    fn canned_responses_use_distinct_codes() {
        // 401 and 403 must stay distinguishable: one asks the user to log
        // in, the other tells an authenticated user they lack rights.
        assert_ne!(
            ErrorResponse::unauthenticated().code,
            ErrorResponse::forbidden().code
        );
    }

    #[test]
    fn error_response_serializes_correctly() {
        let e = ErrorResponse::forbidden();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "FORBIDDEN");
    }
}

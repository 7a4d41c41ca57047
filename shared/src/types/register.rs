use serde::{Deserialize, Serialize};

use super::jwt::Role;

/// Registration request body.  The browser client sends camelCase keys;
/// snake_case is accepted too for API clients.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationData {
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Registration response codes
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationResponse {
    Success {
        user_id: i64,
        email: String,
        role: Role,
        message: String,
        redirect: String,
    },
    Error {
        code: String,
        message: String,
    },
}

/// Error codes for registration
pub enum RegistrationError {
    EmailTaken,
    InvalidName,
    InvalidPassword,
    InvalidEmail,
    MissingField(String),
    DatabaseError,
    InternalError,
}

impl RegistrationError {
    pub fn to_code(&self) -> &'static str {
        match self {
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn to_message(&self) -> String {
        match self {
            Self::EmailTaken => "Email is already registered".to_string(),
            Self::InvalidName => "First and last name must be at least 2 characters".to_string(),
            Self::InvalidPassword => "Password must be at least 6 characters".to_string(),
            Self::InvalidEmail => "Invalid email format".to_string(),
            Self::MissingField(field) => format!("Missing required field: {}", field),
            Self::DatabaseError => "Database error occurred".to_string(),
            Self::InternalError => "An internal error occurred".to_string(),
        }
    }

    pub fn to_response(&self) -> RegistrationResponse {
        RegistrationResponse::Error {
            code: self.to_code().to_string(),
            message: self.to_message(),
        }
    }
}

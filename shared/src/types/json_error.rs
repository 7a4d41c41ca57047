use serde::{Deserialize, Serialize};

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    /// 401-class: no usable session on a request that needs one.
    pub fn unauthenticated() -> Self {
        Self::new("UNAUTHORIZED", "Authentication required")
    }

    /// 403-class: valid session, insufficient rights for the resource.
    pub fn forbidden() -> Self {
        Self::new("FORBIDDEN", "You do not have access to this resource")
    }
}

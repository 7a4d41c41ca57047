pub mod json_error;
pub mod jwt;
pub mod login;
pub mod register;
pub mod server_config;

pub use self::json_error::ErrorResponse;
pub use self::jwt::{Claims, Identity, Role};
pub use self::login::{LoginData, LoginError, LoginResponse};
pub use self::register::{RegistrationData, RegistrationError, RegistrationResponse};
pub use self::server_config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};

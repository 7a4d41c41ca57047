pub mod headers;
pub mod json_response;
pub mod response;

pub use headers::{get_cookie, get_header_value, set_cookie};
pub use json_response::{deliver_error_json, deliver_serialized_json};
pub use response::{deliver_html, deliver_redirect, internal_error_response};

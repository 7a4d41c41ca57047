use std::time::Duration;

use anyhow::{Result, anyhow};
use hyper::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

/// Extract a header value as a string
pub fn get_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Extract cookie value by name.  Absence is normal traffic (an
/// unauthenticated browser), so no logging happens here.
pub fn get_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    get_header_value(headers, "cookie")
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                let name = parts.next()?.trim();
                let value = parts.next()?.trim();
                if name == cookie_name {
                    debug!("Cookie found: {}", cookie_name);
                    Some(value.to_string())
                } else {
                    None
                }
            })
        })
}

/// Set a cookie with options
pub fn set_cookie(
    name: &str,
    value: &str,
    max_age: Option<Duration>,
    path: Option<&str>,
    http_only: bool,
    secure: bool,
) -> Result<HeaderValue> {
    let mut cookie = format!("{}={}", name, value);

    if let Some(age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", age.as_secs()));
    }

    if let Some(p) = path {
        cookie.push_str(&format!("; Path={}", p));
    }

    if http_only {
        cookie.push_str("; HttpOnly");
    }

    if secure {
        cookie.push_str("; Secure");
    }

    cookie.push_str("; SameSite=Strict");

    debug!("Setting cookie: {}", name);

    HeaderValue::from_str(&cookie).map_err(|e| {
        warn!("Failed to create cookie header for {}: {}", name, e);
        anyhow!("Invalid cookie value: {}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_found_among_several() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=fr"),
        );

        assert_eq!(
            get_cookie(&headers, "token"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(get_cookie(&headers, "missing"), None);
    }

    #[test]
    fn cookie_lookup_does_not_match_prefixes() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("token2=evil"));

        assert_eq!(get_cookie(&headers, "token"), None);
    }

    #[test]
    fn set_cookie_renders_all_attributes() {
        let value = set_cookie(
            "token",
            "abc",
            Some(Duration::from_secs(60)),
            Some("/"),
            true,
            true,
        )
        .unwrap();

        assert_eq!(
            value.to_str().unwrap(),
            "token=abc; Max-Age=60; Path=/; HttpOnly; Secure; SameSite=Strict"
        );
    }
}

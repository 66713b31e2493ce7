//! CORS origin policy for the two known web clients.

use std::collections::HashMap;

/// Local development origin.
pub const LOCALHOST_ORIGIN: &str = "http://localhost:3000";
/// Published site origin.
pub const SITE_ORIGIN: &str = "https://tshrestha.github.io";

/// Fixed allow-list origin policy.
///
/// The allow-origin header is reflected for allow-listed origins and
/// omitted otherwise; headers and methods are always wildcarded. Preflight
/// is answered only when the method is OPTIONS *and* the origin is
/// allow-listed, never for one condition alone.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<&'static str>,
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self {
            allowed: vec![LOCALHOST_ORIGIN, SITE_ORIGIN],
        }
    }
}

impl OriginPolicy {
    /// Whether the declared request origin is on the allow-list.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.contains(&origin)
    }

    /// Whether this request is a CORS preflight the gateway should answer.
    pub fn is_preflight(&self, method: &str, origin: &str) -> bool {
        method == "OPTIONS" && self.is_allowed(origin)
    }

    /// Response headers for a request declaring `origin`.
    ///
    /// Allowed headers and methods are always emitted as wildcards; the
    /// allow-origin header is set to the exact origin string on a match and
    /// omitted otherwise, leaving the browser to reject the response.
    pub fn headers_for(&self, origin: &str) -> HashMap<String, String> {
        let mut headers = HashMap::from([
            (
                "Access-Control-Allow-Headers".to_string(),
                "*".to_string(),
            ),
            (
                "Access-Control-Allow-Methods".to_string(),
                "*".to_string(),
            ),
        ]);
        if self.is_allowed(origin) {
            headers.insert(
                "Access-Control-Allow-Origin".to_string(),
                origin.to_string(),
            );
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_origin_is_reflected() {
        let policy = OriginPolicy::default();
        let headers = policy.headers_for(LOCALHOST_ORIGIN);
        assert_eq!(
            headers.get("Access-Control-Allow-Origin").map(String::as_str),
            Some(LOCALHOST_ORIGIN)
        );
    }

    #[test]
    fn unknown_origin_gets_no_allow_origin_header() {
        let policy = OriginPolicy::default();
        let headers = policy.headers_for("https://evil.example.com");
        assert!(!headers.contains_key("Access-Control-Allow-Origin"));
    }

    #[test]
    fn wildcard_headers_are_always_present() {
        let policy = OriginPolicy::default();
        for origin in [SITE_ORIGIN, "https://evil.example.com", ""] {
            let headers = policy.headers_for(origin);
            assert_eq!(
                headers.get("Access-Control-Allow-Headers").map(String::as_str),
                Some("*")
            );
            assert_eq!(
                headers.get("Access-Control-Allow-Methods").map(String::as_str),
                Some("*")
            );
        }
    }

    #[test]
    fn preflight_requires_options_and_allowed_origin() {
        let policy = OriginPolicy::default();
        assert!(policy.is_preflight("OPTIONS", LOCALHOST_ORIGIN));
        assert!(policy.is_preflight("OPTIONS", SITE_ORIGIN));
        assert!(!policy.is_preflight("OPTIONS", "https://evil.example.com"));
        assert!(!policy.is_preflight("GET", SITE_ORIGIN));
    }
}

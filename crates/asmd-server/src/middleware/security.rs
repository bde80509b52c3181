//! Response hardening headers.
//!
//! Pages are static documents: the only style is the inlined sheet, there are
//! no scripts, and Markdown may embed images from anywhere. Every page also
//! carries a `<base>` element, which is pinned to the serving origin.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
const CSP: &str = "default-src 'self'; \
                   script-src 'none'; \
                   object-src 'none'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data: http: https:; \
                   base-uri 'self'; \
                   frame-ancestors 'none'";

/// Headers set on every response, overriding handler values.
const HEADERS: [(&str, &str); 4] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "same-origin"),
];

/// Wrap `router` so every response carries [`HEADERS`].
pub(crate) fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(name: &str) -> Option<&'static str> {
        CSP.split(';')
            .map(str::trim)
            .find(|d| d.split_whitespace().next() == Some(name))
    }

    #[test]
    fn test_csp_forbids_scripts() {
        assert_eq!(directive("script-src"), Some("script-src 'none'"));
        assert_eq!(directive("object-src"), Some("object-src 'none'"));
    }

    #[test]
    fn test_csp_allows_inlined_style_sheet() {
        assert_eq!(
            directive("style-src"),
            Some("style-src 'self' 'unsafe-inline'")
        );
    }

    #[test]
    fn test_csp_allows_remote_images() {
        assert_eq!(directive("img-src"), Some("img-src 'self' data: http: https:"));
    }

    #[test]
    fn test_csp_pins_base_element() {
        assert_eq!(directive("base-uri"), Some("base-uri 'self'"));
    }

    #[test]
    fn test_header_names_are_lowercase() {
        for (name, _) in HEADERS {
            assert_eq!(name, name.to_ascii_lowercase());
        }
    }
}

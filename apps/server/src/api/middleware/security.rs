//! Security headers middleware

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Headers added to every JSON response.
const BASELINE_HEADERS: [(&str, &str); 6] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-site"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

fn served_over_https(req: &Request) -> bool {
    let forwarded = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("https"));
    forwarded
        || req
            .uri()
            .scheme_str()
            .is_some_and(|s| s.eq_ignore_ascii_case("https"))
}

fn apply(headers: &mut HeaderMap, https: bool) {
    for (name, value) in BASELINE_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    // HSTS only when HTTPS is used (or terminated upstream).
    if https {
        headers.insert("strict-transport-security", HeaderValue::from_static(HSTS));
    }
}

/// Adds baseline browser hardening headers to every response.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let https = served_over_https(&req);
    let mut response = next.run(req).await;
    apply(response.headers_mut(), https);
    response
}

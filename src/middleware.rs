//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Middleware that adds security headers to all responses.
///
/// - **Cache-Control: no-store**: signed requests are single-use and must
///   not be cached by browsers or proxies.
/// - **Referrer-Policy: no-referrer**: keeps `?username=` out of the
///   Referer sent to the Duo frame and script hosts.
/// - **X-Content-Type-Options: nosniff**
/// - **X-Frame-Options: DENY**: the login page embeds the Duo frame but is
///   never embedded itself.
/// - **Content-Security-Policy**: scripts only from the Duo CDN, frames only
///   over HTTPS, forms only back to this origin.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("cache-control", HeaderValue::from_static("no-store"));
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static(
            "default-src 'self'; \
             script-src https://api.duosecurity.com; \
             style-src 'unsafe-inline'; \
             frame-src https:; \
             object-src 'none'; \
             frame-ancestors 'none'; \
             base-uri 'self'; \
             form-action 'self'",
        ),
    );

    response
}

//! Request correlation ids.
//!
//! Every request gets an id: the upstream `x-request-id` when it is a sane
//! token, otherwise a fresh UUID v4. The id is tagged on the Sentry scope,
//! recorded on the current span and echoed back on the response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id that is passed through unchanged.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Attach a request id to the request's span, Sentry scope and response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(upstream_id)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Accept an upstream id only if it is short, non-empty printable ASCII.
fn upstream_id(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    let acceptable = !raw.is_empty()
        && raw.len() <= MAX_UPSTREAM_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then_some(raw)
}

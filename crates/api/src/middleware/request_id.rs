//! Request correlation ids.
//!
//! Every request gets one id: the caller's `x-request-id` when it is a short
//! token, otherwise a fresh UUID v4. The id lands on the `http_request` span,
//! the Sentry scope and the response header. It is also scoped to the handler
//! task, so JSON error bodies can repeat it (see [`RequestId::current`]).

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is kept as is.
const MAX_REQUEST_ID_LEN: usize = 64;

tokio::task_local! {
    static CURRENT: RequestId;
}

/// Correlation id of one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Reuse the caller's id if it is usable, else generate one.
    fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|id| is_usable(id))
            .map_or_else(Self::generate, |id| Self(id.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id of the request handled by the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(Clone::clone).ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, bounded, and limited to `[A-Za-z0-9._-]`.
fn is_usable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

/// Attach a [`RequestId`] to the request and echo it on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id.as_str());
    });

    let mut response = CURRENT.scope(request_id.clone(), next.run(request)).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

use axum::{extract::Request, middleware::Next, response::Response};

use crate::identity::{extract_identity, CallerIdentity};

/// Caller identity resolved for the current request. Always present in
/// request extensions once the identity middleware has run; the inner
/// option is `None` for anonymous callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestIdentity(pub Option<CallerIdentity>);

/// Middleware that extracts the caller identity from request headers and
/// injects it into the request. Never rejects: a missing or malformed
/// identity header simply produces an anonymous request.
pub async fn identity_middleware(mut request: Request, next: Next) -> Response {
    let identity = extract_identity(request.headers());
    request.extensions_mut().insert(RequestIdentity(identity));
    next.run(request).await
}

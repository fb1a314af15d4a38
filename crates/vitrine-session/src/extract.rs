//! Session extractor for handlers that require authentication.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;

use crate::session::{Session, resolve_session};

/// Signing secret for session tokens, exposed to the extractor via
/// `FromRef` on the router state.
#[derive(Debug, Clone)]
pub struct SessionSecret(pub String);

/// Extracts the request's session from the cookie, or rejects with 401.
///
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    SessionSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = SessionSecret::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let session = resolve_session(&jar, &secret.0);

        async move { session.map(Self).ok_or(StatusCode::UNAUTHORIZED) }
    }
}

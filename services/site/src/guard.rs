use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use vitrine_session::guard::{GuardAction, UNAUTHORIZED_PATH, decide, signin_redirect_target};
use vitrine_session::session::resolve_session;

use crate::state::AppState;

/// Router-wide page guard. Resolves the session once from the cookie jar and
/// redirects before protected page routes are reached. API routes pass
/// through untouched; their handlers answer with JSON statuses.
pub async fn page_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let jar = CookieJar::from_headers(request.headers());
    let session = resolve_session(&jar, &state.jwt_secret);

    match decide(&path, session.as_ref()) {
        GuardAction::Proceed => next.run(request).await,
        GuardAction::RedirectSignIn { callback_url } => {
            Redirect::temporary(&signin_redirect_target(&callback_url)).into_response()
        }
        GuardAction::RedirectUnauthorized => {
            Redirect::temporary(UNAUTHORIZED_PATH).into_response()
        }
    }
}

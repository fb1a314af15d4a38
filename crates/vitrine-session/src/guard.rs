//! Page-route guard.
//!
//! A pure decision table over three identity states (unauthenticated,
//! authenticated non-admin, authenticated admin) and four path classes.
//! Terminal actions are proceed or redirect — a page route never gets a hard
//! error from the guard. API routes under `/api` classify as [`RouteClass::Public`]
//! here; their handlers enforce auth with JSON statuses instead.

use vitrine_domain::user::UserRole;

use crate::session::Session;

/// Sign-in page, receives the original path as `callbackUrl`.
pub const SIGNIN_PATH: &str = "/signin";

/// Landing page for authenticated users lacking the required role.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

const ADMIN_PREFIX: &str = "/admin";
const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/profile"];
const SKIP_PREFIXES: &[&str] = &["/api/auth", "/assets", "/static"];
const SKIP_EXACT: &[&str] = &["/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// How the guard treats a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Static assets and the auth endpoints — never guarded.
    Skip,
    /// No session required.
    Public,
    /// Any authenticated user.
    Protected,
    /// Admin session required.
    AdminOnly,
}

/// What the middleware should do with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    Proceed,
    RedirectSignIn { callback_url: String },
    RedirectUnauthorized,
}

/// Prefix match on path segments: `/admin` covers `/admin` and `/admin/x`,
/// not `/administration`.
fn has_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn classify_path(path: &str) -> RouteClass {
    if SKIP_EXACT.contains(&path) || SKIP_PREFIXES.iter().any(|p| has_prefix(path, p)) {
        return RouteClass::Skip;
    }
    if has_prefix(path, ADMIN_PREFIX) {
        return RouteClass::AdminOnly;
    }
    if PROTECTED_PREFIXES.iter().any(|p| has_prefix(path, p)) {
        return RouteClass::Protected;
    }
    RouteClass::Public
}

/// Decide the terminal action for a request path given its resolved session.
pub fn decide(path: &str, session: Option<&Session>) -> GuardAction {
    match classify_path(path) {
        RouteClass::Skip | RouteClass::Public => GuardAction::Proceed,
        RouteClass::Protected => match session {
            Some(_) => GuardAction::Proceed,
            None => GuardAction::RedirectSignIn {
                callback_url: path.to_owned(),
            },
        },
        RouteClass::AdminOnly => match session {
            None => GuardAction::RedirectSignIn {
                callback_url: path.to_owned(),
            },
            Some(s) if s.role == UserRole::Admin => GuardAction::Proceed,
            Some(_) => GuardAction::RedirectUnauthorized,
        },
    }
}

/// Sign-in location carrying the original path, e.g.
/// `/signin?callbackUrl=%2Fadmin%2Fprojects`.
pub fn signin_redirect_target(callback_url: &str) -> String {
    format!(
        "{SIGNIN_PATH}?callbackUrl={}",
        urlencoding::encode(callback_url)
    )
}

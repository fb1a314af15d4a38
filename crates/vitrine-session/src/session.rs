//! Request-session resolution.

use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use vitrine_domain::user::{Permission, UserRole};

use crate::cookie::SESSION_COOKIE;
use crate::token::validate_session_token;

/// Identity proven by a valid session cookie.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Pure permission check. Denies without a session and when the session's
/// role does not hold the permission; no side effects.
pub fn authorize(session: Option<&Session>, permission: Permission) -> Decision {
    match session {
        Some(s) if s.role.has_permission(permission) => Decision::Allow,
        _ => Decision::Deny,
    }
}

/// Resolve the session carried by a request's cookies.
///
/// Returns `None` — never an error — when the cookie is absent, malformed,
/// expired, mis-signed, or carries an unknown role. Read-only: the token is
/// not rotated or refreshed here.
pub fn resolve_session(jar: &CookieJar, secret: &str) -> Option<Session> {
    let token = jar.get(SESSION_COOKIE)?.value().to_owned();
    let claims = validate_session_token(&token, secret).ok()?;
    let user_id = claims.sub.parse::<Uuid>().ok()?;
    let role = UserRole::from_u8(claims.role)?;
    Some(Session {
        user_id,
        email: claims.email,
        role,
    })
}

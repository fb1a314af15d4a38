use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Site service error variants.
///
/// Everything a handler can fail with maps onto this enum at the boundary;
/// nothing below it is allowed to panic a request. Passwords and reset tokens
/// never appear in any message.
#[derive(Debug, thiserror::Error)]
pub enum SiteServiceError {
    /// Input failed a policy or shape check. The message names the rule.
    #[error("{0}")]
    Validation(String),
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("authentication required")]
    Unauthorized,
    #[error("admin access required")]
    Forbidden,
    #[error("could not verify identity with provider")]
    OAuthFailed,
    #[error("invalid or expired reset token")]
    InvalidResetToken,
    #[error("user not found")]
    UserNotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl SiteServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::OAuthFailed => "OAUTH_FAILED",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for SiteServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::EmailTaken | Self::InvalidResetToken => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::Unauthorized | Self::OAuthFailed => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountDisabled | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::ProjectNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

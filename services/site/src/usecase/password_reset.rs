use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use vitrine_domain::policy::{normalize_email, validate_password};
use vitrine_domain::user::AuthProvider;

use crate::domain::repository::UserRepository;
use crate::domain::types::{OutboxEvent, RESET_TOKEN_LEN, RESET_TOKEN_TTL_SECS};
use crate::error::SiteServiceError;
use crate::password::hash_password;

/// Response message for forgot-password, identical for hits and misses.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent";

/// Charset for reset tokens (64 URL-safe symbols).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn generate_reset_token() -> String {
    let mut rng = rand::rng();
    (0..RESET_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub email: String,
}

/// `reset_url` is `Some` only when a token was actually issued; the handler
/// exposes it outside production and drops it otherwise.
pub struct ForgotPasswordOutput {
    pub reset_url: Option<String>,
}

pub struct ForgotPasswordUseCase<R: UserRepository> {
    pub users: R,
    pub public_base_url: String,
}

impl<R: UserRepository> ForgotPasswordUseCase<R> {
    pub async fn execute(
        &self,
        input: ForgotPasswordInput,
    ) -> Result<ForgotPasswordOutput, SiteServiceError> {
        let email = normalize_email(&input.email);

        // Unknown and OAuth-only addresses take the same outward path as a hit.
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(ForgotPasswordOutput { reset_url: None });
        };
        if user.provider != AuthProvider::Credentials {
            return Ok(ForgotPasswordOutput { reset_url: None });
        }

        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        let reset_url = format!("{}/reset-password?token={token}", self.public_base_url);

        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: "password_reset_requested".to_owned(),
            payload: json!({ "email": user.email, "reset_url": reset_url }),
            idempotency_key: format!("password_reset_requested:{token}"),
        };
        self.users
            .set_reset_token_with_outbox(user.id, &token, expires_at, &event)
            .await?;

        Ok(ForgotPasswordOutput {
            reset_url: Some(reset_url),
        })
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
}

pub struct ResetPasswordUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ResetPasswordUseCase<R> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), SiteServiceError> {
        let user = self
            .users
            .find_by_reset_token(&input.token)
            .await?
            .filter(|user| user.reset_token_valid())
            .ok_or(SiteServiceError::InvalidResetToken)?;

        validate_password(&input.password)
            .map_err(|violation| SiteServiceError::Validation(violation.to_string()))?;

        let hash = hash_password(&input.password)?;
        // set_password clears the token in the same row update.
        self.users.set_password(user.id, &hash).await
    }
}

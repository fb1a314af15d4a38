use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_domain::user::{AuthProvider, UserRole};

/// Account record as the use cases see it.
///
/// `password_hash` is `None` for OAuth-provisioned accounts; those can never
/// log in with credentials or run the reset flow.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub provider: AuthProvider,
    pub role: UserRole,
    pub is_active: bool,
    pub email_verified: bool,
    pub phone: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A reset token counts only while unexpired; consumed tokens are cleared.
    pub fn reset_token_valid(&self) -> bool {
        self.reset_token.is_some() && self.reset_token_expires_at.is_some_and(|t| t > Utc::now())
    }
}

/// Message submitted through the public contact form.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Portfolio project. Only `published` rows are served publicly.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outbox event for async delivery (e.g. the reset email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Identity confirmed by an OAuth provider token exchange.
#[derive(Debug, Clone)]
pub struct VerifiedProfile {
    pub email: String,
    pub name: String,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SiteStats {
    pub users: u64,
    pub messages: u64,
    pub projects: u64,
}

/// Reset token length in characters.
pub const RESET_TOKEN_LEN: usize = 48;

/// Reset token time-to-live in seconds.
pub const RESET_TOKEN_TTL_SECS: i64 = 3600;

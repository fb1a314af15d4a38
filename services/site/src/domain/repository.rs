#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vitrine_domain::pagination::PageRequest;
use vitrine_domain::user::{AuthProvider, UserRole};

use crate::domain::types::{ContactMessage, OutboxEvent, Project, User, VerifiedProfile};
use crate::error::SiteServiceError;

/// Fields a new account row is created from. The repository assigns timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub provider: AuthProvider,
    pub role: UserRole,
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SiteServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SiteServiceError>;

    /// Find by reset token regardless of expiry; the caller checks validity.
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, SiteServiceError>;

    /// Insert a new account and return the stored row.
    async fn create(&self, user: &NewUser) -> Result<User, SiteServiceError>;

    /// Update profile fields. `None` leaves the field untouched.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), SiteServiceError>;

    /// Store a reset token and an outbox event atomically (same transaction).
    async fn set_reset_token_with_outbox(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), SiteServiceError>;

    /// Set the password hash and clear any reset token in one update.
    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), SiteServiceError>;

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, SiteServiceError>;

    async fn count(&self) -> Result<u64, SiteServiceError>;

    /// Admin override of role and active flag. Returns the updated row.
    async fn set_role_active(
        &self,
        id: Uuid,
        role: UserRole,
        is_active: bool,
    ) -> Result<User, SiteServiceError>;
}

/// Repository for contact form messages.
pub trait ContactMessageRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> Result<(), SiteServiceError>;

    async fn list(&self, page: PageRequest) -> Result<Vec<ContactMessage>, SiteServiceError>;

    async fn count(&self) -> Result<u64, SiteServiceError>;
}

/// Fields a project is created or updated from.
#[derive(Debug, Clone)]
pub struct ProjectDraft {
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    pub published: bool,
}

/// Repository for portfolio projects.
pub trait ProjectRepository: Send + Sync {
    /// Published projects, newest first.
    async fn list_published(&self) -> Result<Vec<Project>, SiteServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, SiteServiceError>;

    /// Insert a new project and return the stored row.
    async fn create(&self, id: Uuid, draft: &ProjectDraft) -> Result<Project, SiteServiceError>;

    /// Replace the mutable fields. `None` when the project does not exist.
    async fn update(
        &self,
        id: Uuid,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, SiteServiceError>;

    /// Delete a project. Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, SiteServiceError>;

    async fn count(&self) -> Result<u64, SiteServiceError>;
}

/// Port for exchanging an OAuth authorization code for a verified profile.
pub trait OAuthVerifier: Send + Sync {
    /// `Ok(None)` means the provider rejected the code; transport failures are `Err`.
    async fn verify(
        &self,
        provider: AuthProvider,
        code: &str,
    ) -> Result<Option<VerifiedProfile>, SiteServiceError>;
}

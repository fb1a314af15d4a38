use uuid::Uuid;

use vitrine_domain::pagination::PageRequest;
use vitrine_domain::user::UserRole;

use crate::domain::repository::{ContactMessageRepository, ProjectRepository, UserRepository};
use crate::domain::types::{ContactMessage, SiteStats, User};
use crate::error::SiteServiceError;

// ── SiteStats ────────────────────────────────────────────────────────────────

pub struct SiteStatsUseCase<U, M, P>
where
    U: UserRepository,
    M: ContactMessageRepository,
    P: ProjectRepository,
{
    pub users: U,
    pub messages: M,
    pub projects: P,
}

impl<U, M, P> SiteStatsUseCase<U, M, P>
where
    U: UserRepository,
    M: ContactMessageRepository,
    P: ProjectRepository,
{
    pub async fn execute(&self) -> Result<SiteStats, SiteServiceError> {
        Ok(SiteStats {
            users: self.users.count().await?,
            messages: self.messages.count().await?,
            projects: self.projects.count().await?,
        })
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct UserPage {
    pub items: Vec<User>,
    pub total: u64,
}

pub struct ListUsersUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<UserPage, SiteServiceError> {
        Ok(UserPage {
            items: self.users.list(page).await?,
            total: self.users.count().await?,
        })
    }
}

// ── ListMessages ─────────────────────────────────────────────────────────────

pub struct MessagePage {
    pub items: Vec<ContactMessage>,
    pub total: u64,
}

pub struct ListMessagesUseCase<R: ContactMessageRepository> {
    pub messages: R,
}

impl<R: ContactMessageRepository> ListMessagesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<MessagePage, SiteServiceError> {
        Ok(MessagePage {
            items: self.messages.list(page).await?,
            total: self.messages.count().await?,
        })
    }
}

// ── UpdateUserAccess ─────────────────────────────────────────────────────────

pub struct UpdateUserAccessInput {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub struct UpdateUserAccessUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> UpdateUserAccessUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateUserAccessInput,
    ) -> Result<User, SiteServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(SiteServiceError::UserNotFound)?;

        let role = input.role.unwrap_or(user.role);
        let is_active = input.is_active.unwrap_or(user.is_active);
        self.users.set_role_active(user.id, role, is_active).await
    }
}

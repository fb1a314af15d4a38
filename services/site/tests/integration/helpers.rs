use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use vitrine_domain::pagination::PageRequest;
use vitrine_domain::user::{AuthProvider, UserRole};
use vitrine_session::cookie::SESSION_COOKIE;
use vitrine_session::token::issue_session_token;

use vitrine_site::config::Environment;
use vitrine_site::domain::repository::{
    ContactMessageRepository, NewUser, OAuthVerifier, ProjectDraft, ProjectRepository,
    UserRepository,
};
use vitrine_site::domain::types::{ContactMessage, OutboxEvent, Project, User, VerifiedProfile};
use vitrine_site::error::SiteServiceError;
use vitrine_site::infra::oauth::OAuthCredentials;
use vitrine_site::state::AppState;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// Clones share the same backing store, so one repo can feed several
/// use cases within a test.
#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    pub events: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    /// Returns a shared handle to the recorded outbox events.
    pub fn events_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.events)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SiteServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SiteServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, SiteServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, SiteServiceError> {
        let now = Utc::now();
        let stored = User {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            provider: user.provider,
            role: user.role,
            is_active: true,
            email_verified: user.provider != AuthProvider::Credentials,
            phone: None,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), SiteServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            if let Some(name) = name {
                u.name = name.to_owned();
            }
            if let Some(phone) = phone {
                u.phone = Some(phone.to_owned());
            }
            u.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_reset_token_with_outbox(
        &self,
        id: Uuid,
        token: &str,
        expires_at: chrono::DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), SiteServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.reset_token = Some(token.to_owned());
            u.reset_token_expires_at = Some(expires_at);
            u.updated_at = Utc::now();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), SiteServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.password_hash = Some(password_hash.to_owned());
            u.reset_token = None;
            u.reset_token_expires_at = None;
            u.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, SiteServiceError> {
        let page = page.clamped();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn set_role_active(
        &self,
        id: Uuid,
        role: UserRole,
        is_active: bool,
    ) -> Result<User, SiteServiceError> {
        let mut users = self.users.lock().unwrap();
        let u = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(SiteServiceError::UserNotFound)?;
        u.role = role;
        u.is_active = is_active;
        u.updated_at = Utc::now();
        Ok(u.clone())
    }
}

// ── MockContactRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockContactRepo {
    pub messages: Arc<Mutex<Vec<ContactMessage>>>,
}

impl MockContactRepo {
    pub fn new(messages: Vec<ContactMessage>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(messages)),
        }
    }
}

impl ContactMessageRepository for MockContactRepo {
    async fn create(&self, message: &ContactMessage) -> Result<(), SiteServiceError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<ContactMessage>, SiteServiceError> {
        let page = page.clamped();
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        Ok(self.messages.lock().unwrap().len() as u64)
    }
}

// ── MockProjectRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockProjectRepo {
    pub projects: Arc<Mutex<Vec<Project>>>,
}

impl MockProjectRepo {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(Mutex::new(projects)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal project list for post-execution inspection.
    pub fn projects_handle(&self) -> Arc<Mutex<Vec<Project>>> {
        Arc::clone(&self.projects)
    }
}

impl ProjectRepository for MockProjectRepo {
    async fn list_published(&self) -> Result<Vec<Project>, SiteServiceError> {
        let mut published: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(published)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, SiteServiceError> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, id: Uuid, draft: &ProjectDraft) -> Result<Project, SiteServiceError> {
        let now = Utc::now();
        let stored = Project {
            id,
            title: draft.title.clone(),
            summary: draft.summary.clone(),
            url: draft.url.clone(),
            published: draft.published,
            published_at: draft.published.then_some(now),
            created_at: now,
            updated_at: now,
        };
        self.projects.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, SiteServiceError> {
        let mut projects = self.projects.lock().unwrap();
        let Some(p) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();
        p.title = draft.title.clone();
        p.summary = draft.summary.clone();
        p.url = draft.url.clone();
        // published_at marks the first publish; unpublishing clears it.
        p.published_at = match (p.published, draft.published) {
            (false, true) => Some(now),
            (_, false) => None,
            (true, true) => p.published_at,
        };
        p.published = draft.published;
        p.updated_at = now;
        Ok(Some(p.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SiteServiceError> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() < before)
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        Ok(self.projects.lock().unwrap().len() as u64)
    }
}

// ── MockOAuthVerifier ────────────────────────────────────────────────────────

/// `profile: None` plays a provider that rejected the code.
pub struct MockOAuthVerifier {
    pub profile: Option<VerifiedProfile>,
}

impl OAuthVerifier for MockOAuthVerifier {
    async fn verify(
        &self,
        _provider: AuthProvider,
        _code: &str,
    ) -> Result<Option<VerifiedProfile>, SiteServiceError> {
        Ok(self.profile.clone())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Password all credential fixtures are hashed with.
pub const TEST_PASSWORD: &str = "Sup3rsecret";

/// Cost 4 is the bcrypt minimum and keeps the suite fast; verification
/// accepts any cost.
pub fn test_hash(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        name: "Test User".to_owned(),
        email: "user@example.com".to_owned(),
        password_hash: Some(test_hash(TEST_PASSWORD)),
        provider: AuthProvider::Credentials,
        role: UserRole::User,
        is_active: true,
        email_verified: false,
        phone: None,
        reset_token: None,
        reset_token_expires_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap(),
        name: "Test Admin".to_owned(),
        email: "admin@example.com".to_owned(),
        role: UserRole::Admin,
        ..test_user()
    }
}

pub fn test_oauth_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000003").unwrap(),
        name: "OAuth User".to_owned(),
        email: "oauth@example.com".to_owned(),
        password_hash: None,
        provider: AuthProvider::Google,
        email_verified: true,
        ..test_user()
    }
}

/// Cookie header value carrying a freshly signed session for `user`.
pub fn session_cookie_for(user: &User) -> String {
    let (token, _) =
        issue_session_token(user.id, &user.email, user.role, TEST_JWT_SECRET).unwrap();
    format!("{SESSION_COOKIE}={token}")
}

/// State for router tests. The connection is disconnected; only routes that
/// never reach the database are exercised at this level.
pub fn test_state() -> AppState {
    AppState {
        db: sea_orm::DatabaseConnection::default(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        cookie_domain: "localhost".to_owned(),
        public_base_url: "http://localhost:3000".to_owned(),
        environment: Environment::Development,
        http: reqwest::Client::new(),
        google: OAuthCredentials {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
        },
        github: OAuthCredentials {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
        },
    }
}

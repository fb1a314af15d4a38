use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_domain::pagination::PageRequest;
use vitrine_domain::user::{AuthProvider, Permission, UserRole};
use vitrine_session::extract::CurrentSession;
use vitrine_session::session::{Decision, Session, authorize};

use crate::domain::types::{ContactMessage, Project, User};
use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::admin::{
    ListMessagesUseCase, ListUsersUseCase, SiteStatsUseCase, UpdateUserAccessInput,
    UpdateUserAccessUseCase,
};
use crate::usecase::project::{
    CreateProjectUseCase, DeleteProjectUseCase, ProjectInput, UpdateProjectUseCase,
};

fn require(session: &Session, permission: Permission) -> Result<(), SiteServiceError> {
    match authorize(Some(session), permission) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(SiteServiceError::Forbidden),
    }
}

// ── GET /api/admin/stats ─────────────────────────────────────────────────────

pub async fn stats(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ViewAnalytics)?;
    let usecase = SiteStatsUseCase {
        users: state.user_repo(),
        messages: state.contact_repo(),
        projects: state.project_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(stats))
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdminUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub provider: AuthProvider,
    pub is_active: bool,
    pub email_verified: bool,
    pub phone: Option<String>,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn admin_user_response(user: &User) -> AdminUserResponse {
    AdminUserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        provider: user.provider,
        is_active: user.is_active,
        email_verified: user.email_verified,
        phone: user.phone.clone(),
        created_at: user.created_at,
    }
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub items: Vec<AdminUserResponse>,
    pub total: u64,
}

pub async fn list_users(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ManageUsers)?;
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let page = usecase.execute(page).await?;
    Ok(Json(UserListResponse {
        items: page.items.iter().map(admin_user_response).collect(),
        total: page.total,
    }))
}

// ── PATCH /api/admin/users/{id} ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserAccessRequest {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub async fn update_user_access(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserAccessRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ManageUsers)?;
    let usecase = UpdateUserAccessUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            id,
            UpdateUserAccessInput {
                role: body.role,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(admin_user_response(&user)))
}

// ── GET /api/admin/messages ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AdminMessageResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn admin_message_response(message: &ContactMessage) -> AdminMessageResponse {
    AdminMessageResponse {
        id: message.id,
        name: message.name.clone(),
        email: message.email.clone(),
        subject: message.subject.clone(),
        message: message.body.clone(),
        created_at: message.created_at,
    }
}

#[derive(Serialize)]
pub struct MessageListResponse {
    pub items: Vec<AdminMessageResponse>,
    pub total: u64,
}

pub async fn list_messages(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ManageContent)?;
    let usecase = ListMessagesUseCase {
        messages: state.contact_repo(),
    };
    let page = usecase.execute(page).await?;
    Ok(Json(MessageListResponse {
        items: page.items.iter().map(admin_message_response).collect(),
        total: page.total,
    }))
}

// ── POST /api/admin/projects ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Serialize)]
pub struct AdminProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    pub published: bool,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms_opt")]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn admin_project_response(project: &Project) -> AdminProjectResponse {
    AdminProjectResponse {
        id: project.id,
        title: project.title.clone(),
        summary: project.summary.clone(),
        url: project.url.clone(),
        published: project.published,
        published_at: project.published_at,
        created_at: project.created_at,
        updated_at: project.updated_at,
    }
}

fn project_input(body: ProjectRequest) -> ProjectInput {
    ProjectInput {
        title: body.title,
        summary: body.summary,
        url: body.url,
        published: body.published,
    }
}

pub async fn create_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<ProjectRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ManageContent)?;
    let usecase = CreateProjectUseCase {
        projects: state.project_repo(),
    };
    let project = usecase.execute(project_input(body)).await?;
    Ok((StatusCode::CREATED, Json(admin_project_response(&project))))
}

// ── PUT /api/admin/projects/{id} ─────────────────────────────────────────────

pub async fn update_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(body): Json<ProjectRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::ManageContent)?;
    let usecase = UpdateProjectUseCase {
        projects: state.project_repo(),
    };
    let project = usecase.execute(id, project_input(body)).await?;
    Ok(Json(admin_project_response(&project)))
}

// ── DELETE /api/admin/projects/{id} ──────────────────────────────────────────

pub async fn delete_project(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SiteServiceError> {
    require(&session, Permission::DeleteContent)?;
    let usecase = DeleteProjectUseCase {
        projects: state.project_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

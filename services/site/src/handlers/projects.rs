use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Project;
use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::project::ListPublishedProjectsUseCase;

// ── GET /api/projects ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(serialize_with = "vitrine_core::serde::to_rfc3339_ms_opt")]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub fn project_response(project: &Project) -> ProjectResponse {
    ProjectResponse {
        id: project.id,
        title: project.title.clone(),
        summary: project.summary.clone(),
        url: project.url.clone(),
        published_at: project.published_at,
    }
}

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = ListPublishedProjectsUseCase {
        projects: state.project_repo(),
    };
    let projects = usecase.execute().await?;
    let body: Vec<ProjectResponse> = projects.iter().map(project_response).collect();
    Ok(Json(body))
}

use uuid::Uuid;

use crate::domain::repository::{ProjectDraft, ProjectRepository};
use crate::domain::types::Project;
use crate::error::SiteServiceError;

pub struct ProjectInput {
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    pub published: bool,
}

fn validate_draft(input: ProjectInput) -> Result<ProjectDraft, SiteServiceError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(SiteServiceError::Validation("title must not be empty".into()));
    }
    let summary = input.summary.trim();
    if summary.is_empty() {
        return Err(SiteServiceError::Validation(
            "summary must not be empty".into(),
        ));
    }
    let url = input
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_owned);
    if let Some(ref url) = url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SiteServiceError::Validation(
                "url must start with http:// or https://".into(),
            ));
        }
    }
    Ok(ProjectDraft {
        title: title.to_owned(),
        summary: summary.to_owned(),
        url,
        published: input.published,
    })
}

// ── ListPublishedProjects ────────────────────────────────────────────────────

pub struct ListPublishedProjectsUseCase<R: ProjectRepository> {
    pub projects: R,
}

impl<R: ProjectRepository> ListPublishedProjectsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Project>, SiteServiceError> {
        self.projects.list_published().await
    }
}

// ── CreateProject ────────────────────────────────────────────────────────────

pub struct CreateProjectUseCase<R: ProjectRepository> {
    pub projects: R,
}

impl<R: ProjectRepository> CreateProjectUseCase<R> {
    pub async fn execute(&self, input: ProjectInput) -> Result<Project, SiteServiceError> {
        let draft = validate_draft(input)?;
        self.projects.create(Uuid::now_v7(), &draft).await
    }
}

// ── UpdateProject ────────────────────────────────────────────────────────────

pub struct UpdateProjectUseCase<R: ProjectRepository> {
    pub projects: R,
}

impl<R: ProjectRepository> UpdateProjectUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: ProjectInput) -> Result<Project, SiteServiceError> {
        let draft = validate_draft(input)?;
        self.projects
            .update(id, &draft)
            .await?
            .ok_or(SiteServiceError::ProjectNotFound)
    }
}

// ── DeleteProject ────────────────────────────────────────────────────────────

pub struct DeleteProjectUseCase<R: ProjectRepository> {
    pub projects: R,
}

impl<R: ProjectRepository> DeleteProjectUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), SiteServiceError> {
        if !self.projects.delete(id).await? {
            return Err(SiteServiceError::ProjectNotFound);
        }
        Ok(())
    }
}

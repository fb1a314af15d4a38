use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use vitrine_domain::pagination::PageRequest;
use vitrine_domain::user::{AuthProvider, UserRole};
use vitrine_site_schema::{contact_messages, outbox_events, projects, users};

use crate::domain::repository::{
    ContactMessageRepository, NewUser, ProjectDraft, ProjectRepository, UserRepository,
};
use crate::domain::types::{ContactMessage, OutboxEvent, Project, User};
use crate::error::SiteServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SiteServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, SiteServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, SiteServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::ResetToken.eq(token))
            .one(&self.db)
            .await
            .context("find user by reset token")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, SiteServiceError> {
        let now = Utc::now();
        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            provider: Set(user.provider.as_str().to_owned()),
            role: Set(user.role.as_u8() as i16),
            is_active: Set(true),
            email_verified: Set(user.provider != AuthProvider::Credentials),
            phone: Set(None),
            reset_token: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), SiteServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(new_name) = name {
            am.name = Set(new_name.to_owned());
        }
        if let Some(new_phone) = phone {
            am.phone = Set(Some(new_phone.to_owned()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db)
            .await
            .context("update user profile")?;
        Ok(())
    }

    async fn set_reset_token_with_outbox(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), SiteServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let token = token.to_owned();
                let event = event.clone();
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(id),
                        reset_token: Set(Some(token)),
                        reset_token_expires_at: Set(Some(expires_at)),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("set reset token with outbox")?;
        Ok(())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), SiteServiceError> {
        // One row update: the new hash lands and any reset token dies together.
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(password_hash.to_owned())),
            reset_token: Set(None),
            reset_token_expires_at: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set password")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, SiteServiceError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn set_role_active(
        &self,
        id: Uuid,
        role: UserRole,
        is_active: bool,
    ) -> Result<User, SiteServiceError> {
        let model = users::ActiveModel {
            id: Set(id),
            role: Set(role.as_u8() as i16),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user role/active")?;
        Ok(user_from_model(model))
    }
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        // Unknown tags fall back to the least-privileged reading.
        provider: AuthProvider::from_str_tag(&model.provider)
            .unwrap_or(AuthProvider::Credentials),
        role: UserRole::from_u8(model.role as u8).unwrap_or(UserRole::User),
        is_active: model.is_active,
        email_verified: model.email_verified,
        phone: model.phone,
        reset_token: model.reset_token,
        reset_token_expires_at: model.reset_token_expires_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── ContactMessage repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContactMessageRepository {
    pub db: DatabaseConnection,
}

impl ContactMessageRepository for DbContactMessageRepository {
    async fn create(&self, message: &ContactMessage) -> Result<(), SiteServiceError> {
        contact_messages::ActiveModel {
            id: Set(message.id),
            name: Set(message.name.clone()),
            email: Set(message.email.clone()),
            subject: Set(message.subject.clone()),
            body: Set(message.body.clone()),
            created_at: Set(message.created_at),
        }
        .insert(&self.db)
        .await
        .context("create contact message")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<ContactMessage>, SiteServiceError> {
        let page = page.clamped();
        let models = contact_messages::Entity::find()
            .order_by_desc(contact_messages::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list contact messages")?;
        Ok(models.into_iter().map(contact_message_from_model).collect())
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        let count = contact_messages::Entity::find()
            .count(&self.db)
            .await
            .context("count contact messages")?;
        Ok(count)
    }
}

fn contact_message_from_model(model: contact_messages::Model) -> ContactMessage {
    ContactMessage {
        id: model.id,
        name: model.name,
        email: model.email,
        subject: model.subject,
        body: model.body,
        created_at: model.created_at,
    }
}

// ── Project repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProjectRepository {
    pub db: DatabaseConnection,
}

impl ProjectRepository for DbProjectRepository {
    async fn list_published(&self) -> Result<Vec<Project>, SiteServiceError> {
        let models = projects::Entity::find()
            .filter(projects::Column::Published.eq(true))
            .order_by_desc(projects::Column::PublishedAt)
            .all(&self.db)
            .await
            .context("list published projects")?;
        Ok(models.into_iter().map(project_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, SiteServiceError> {
        let model = projects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find project by id")?;
        Ok(model.map(project_from_model))
    }

    async fn create(&self, id: Uuid, draft: &ProjectDraft) -> Result<Project, SiteServiceError> {
        let now = Utc::now();
        let model = projects::ActiveModel {
            id: Set(id),
            title: Set(draft.title.clone()),
            summary: Set(draft.summary.clone()),
            url: Set(draft.url.clone()),
            published: Set(draft.published),
            published_at: Set(draft.published.then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("create project")?;
        Ok(project_from_model(model))
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, SiteServiceError> {
        let existing = projects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find project for update")?;
        let Some(row) = existing else {
            return Ok(None);
        };

        let was_published = row.published;
        let kept_published_at = row.published_at;
        let mut project = row.into_active_model();
        project.title = Set(draft.title.clone());
        project.summary = Set(draft.summary.clone());
        project.url = Set(draft.url.clone());
        project.published = Set(draft.published);
        // published_at marks the first publish; unpublishing clears it.
        project.published_at = Set(match (was_published, draft.published) {
            (false, true) => Some(Utc::now()),
            (_, false) => None,
            (true, true) => kept_published_at,
        });
        project.updated_at = Set(Utc::now());
        let model = project.update(&self.db).await.context("update project")?;
        Ok(Some(project_from_model(model)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SiteServiceError> {
        let result = projects::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete project")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, SiteServiceError> {
        let count = projects::Entity::find()
            .count(&self.db)
            .await
            .context("count projects")?;
        Ok(count)
    }
}

fn project_from_model(model: projects::Model) -> Project {
    Project {
        id: model.id,
        title: model.title,
        summary: model.summary,
        url: model.url,
        published: model.published,
        published_at: model.published_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

use chrono::Utc;
use uuid::Uuid;

use vitrine_domain::policy::{is_valid_email, normalize_email};

use crate::domain::repository::ContactMessageRepository;
use crate::domain::types::ContactMessage;
use crate::error::SiteServiceError;

pub struct SubmitContactInput {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub body: String,
}

pub struct SubmitContactUseCase<R: ContactMessageRepository> {
    pub messages: R,
}

impl<R: ContactMessageRepository> SubmitContactUseCase<R> {
    pub async fn execute(
        &self,
        input: SubmitContactInput,
    ) -> Result<ContactMessage, SiteServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SiteServiceError::Validation("name must not be empty".into()));
        }
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(SiteServiceError::Validation(
                "email is not a valid address".into(),
            ));
        }
        let body = input.body.trim();
        if body.is_empty() {
            return Err(SiteServiceError::Validation(
                "message must not be empty".into(),
            ));
        }
        let subject = input
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let message = ContactMessage {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            email,
            subject,
            body: body.to_owned(),
            created_at: Utc::now(),
        };
        self.messages.create(&message).await?;
        Ok(message)
    }
}

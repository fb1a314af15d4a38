use uuid::Uuid;

use vitrine_domain::policy::validate_password;
use vitrine_domain::user::AuthProvider;

use crate::domain::repository::UserRepository;
use crate::error::SiteServiceError;
use crate::password::{hash_password, verify_password};

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug)]
pub struct UpdateProfileOutput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<UpdateProfileOutput, SiteServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(SiteServiceError::UserNotFound)?;
        if !user.is_active {
            return Err(SiteServiceError::AccountDisabled);
        }

        let name = input.name.as_deref().map(str::trim);
        if name == Some("") {
            return Err(SiteServiceError::Validation("name must not be empty".into()));
        }

        if let Some(ref new_password) = input.new_password {
            // Provider check comes first: OAuth accounts are rejected no
            // matter what values were supplied.
            if user.provider != AuthProvider::Credentials {
                return Err(SiteServiceError::Validation(
                    "password can only be changed on credentials accounts".into(),
                ));
            }
            validate_password(new_password)
                .map_err(|violation| SiteServiceError::Validation(violation.to_string()))?;
            let current = input.current_password.as_deref().ok_or_else(|| {
                SiteServiceError::Validation("current password is required".into())
            })?;
            let Some(hash) = user.password_hash.as_deref() else {
                return Err(SiteServiceError::Validation(
                    "password can only be changed on credentials accounts".into(),
                ));
            };
            if !verify_password(current, hash)? {
                return Err(SiteServiceError::InvalidCredentials);
            }
            self.users
                .set_password(user.id, &hash_password(new_password)?)
                .await?;
        }

        if name.is_some() || input.phone.is_some() {
            self.users
                .update_profile(user.id, name, input.phone.as_deref())
                .await?;
        }

        let updated = self
            .users
            .find_by_id(user.id)
            .await?
            .ok_or(SiteServiceError::UserNotFound)?;
        Ok(UpdateProfileOutput {
            name: updated.name,
            email: updated.email,
            phone: updated.phone,
        })
    }
}

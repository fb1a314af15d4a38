use uuid::Uuid;

use vitrine_domain::policy::{is_valid_email, normalize_email, validate_password};
use vitrine_domain::user::{AuthProvider, UserRole};

use crate::domain::repository::{NewUser, UserRepository};
use crate::domain::types::User;
use crate::error::SiteServiceError;
use crate::password::{hash_password, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, SiteServiceError> {
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
        validate_password(&input.password)
            .map_err(|violation| SiteServiceError::Validation(violation.to_string()))?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(SiteServiceError::EmailTaken);
        }

        let user = NewUser {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            email,
            password_hash: Some(hash_password(&input.password)?),
            provider: AuthProvider::Credentials,
            role: UserRole::User,
        };
        self.users.create(&user).await
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<User, SiteServiceError> {
        let email = normalize_email(&input.email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(SiteServiceError::InvalidCredentials);
        };
        // OAuth-provisioned accounts have no hash and never pass here.
        let Some(hash) = user.password_hash.as_deref() else {
            return Err(SiteServiceError::InvalidCredentials);
        };
        if !verify_password(&input.password, hash)? {
            return Err(SiteServiceError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(SiteServiceError::AccountDisabled);
        }
        Ok(user)
    }
}

use uuid::Uuid;

use vitrine_domain::policy::normalize_email;
use vitrine_domain::user::{AuthProvider, UserRole};

use crate::domain::repository::{NewUser, OAuthVerifier, UserRepository};
use crate::domain::types::User;
use crate::error::SiteServiceError;

pub struct OAuthSignInInput {
    pub provider: AuthProvider,
    pub code: String,
}

pub struct OAuthSignInUseCase<R, V>
where
    R: UserRepository,
    V: OAuthVerifier,
{
    pub users: R,
    pub verifier: V,
}

impl<R, V> OAuthSignInUseCase<R, V>
where
    R: UserRepository,
    V: OAuthVerifier,
{
    pub async fn execute(&self, input: OAuthSignInInput) -> Result<User, SiteServiceError> {
        if input.provider == AuthProvider::Credentials {
            return Err(SiteServiceError::Validation("unknown oauth provider".into()));
        }

        let profile = self
            .verifier
            .verify(input.provider, &input.code)
            .await?
            .ok_or(SiteServiceError::OAuthFailed)?;

        // Existing account signs in as-is, whatever its provider; the
        // provider tag and password are never mutated here.
        let email = normalize_email(&profile.email);
        if let Some(user) = self.users.find_by_email(&email).await? {
            if !user.is_active {
                return Err(SiteServiceError::AccountDisabled);
            }
            return Ok(user);
        }

        let user = NewUser {
            id: Uuid::now_v7(),
            name: profile.name,
            email,
            password_hash: None,
            provider: input.provider,
            role: UserRole::User,
        };
        self.users.create(&user).await
    }
}

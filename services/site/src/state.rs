use axum::extract::FromRef;
use sea_orm::DatabaseConnection;
use vitrine_session::extract::SessionSecret;

use crate::config::Environment;
use crate::infra::db::{DbContactMessageRepository, DbProjectRepository, DbUserRepository};
use crate::infra::oauth::{HttpOAuthVerifier, OAuthCredentials};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub public_base_url: String,
    pub environment: Environment,
    pub http: reqwest::Client,
    pub google: OAuthCredentials,
    pub github: OAuthCredentials,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn contact_repo(&self) -> DbContactMessageRepository {
        DbContactMessageRepository {
            db: self.db.clone(),
        }
    }

    pub fn project_repo(&self) -> DbProjectRepository {
        DbProjectRepository {
            db: self.db.clone(),
        }
    }

    pub fn oauth_verifier(&self) -> HttpOAuthVerifier {
        HttpOAuthVerifier {
            http: self.http.clone(),
            google: self.google.clone(),
            github: self.github.clone(),
        }
    }
}

// Lets the session extractor and the readiness probe pull what they need
// without taking the whole state.
impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        SessionSecret(state.jwt_secret.clone())
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

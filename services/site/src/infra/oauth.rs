use anyhow::Context as _;
use serde::Deserialize;

use vitrine_domain::user::AuthProvider;

use crate::domain::repository::OAuthVerifier;
use crate::domain::types::VerifiedProfile;
use crate::error::SiteServiceError;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";
const GITHUB_EMAILS_URL: &str = "https://api.github.com/user/emails";

/// Client id/secret pair plus the redirect URI registered with the provider.
/// Empty credentials disable the provider.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthCredentials {
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// `OAuthVerifier` over plain HTTPS: authorization-code exchange followed by
/// a userinfo lookup. Provider rejections surface as `Ok(None)`; only
/// transport and decoding failures are `Err`.
#[derive(Clone)]
pub struct HttpOAuthVerifier {
    pub http: reqwest::Client,
    pub google: OAuthCredentials,
    pub github: OAuthCredentials,
}

impl OAuthVerifier for HttpOAuthVerifier {
    async fn verify(
        &self,
        provider: AuthProvider,
        code: &str,
    ) -> Result<Option<VerifiedProfile>, SiteServiceError> {
        match provider {
            AuthProvider::Google => self.verify_google(code).await,
            AuthProvider::Github => self.verify_github(code).await,
            AuthProvider::Credentials => Ok(None),
        }
    }
}

impl HttpOAuthVerifier {
    async fn verify_google(&self, code: &str) -> Result<Option<VerifiedProfile>, SiteServiceError> {
        if !self.google.is_configured() {
            return Ok(None);
        }
        let resp = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.google.client_id.as_str()),
                ("client_secret", self.google.client_secret.as_str()),
                ("redirect_uri", self.google.redirect_uri.as_str()),
            ])
            .send()
            .await
            .context("google token exchange")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let token: TokenResponse = resp.json().await.context("decode google token response")?;
        let Some(access_token) = token.access_token else {
            return Ok(None);
        };

        let resp = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&access_token)
            .send()
            .await
            .context("google userinfo")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let info: GoogleUserInfo = resp.json().await.context("decode google userinfo")?;
        if info.email_verified == Some(false) {
            return Ok(None);
        }
        Ok(Some(VerifiedProfile {
            name: info.name.unwrap_or_else(|| info.email.clone()),
            email: info.email,
        }))
    }

    async fn verify_github(&self, code: &str) -> Result<Option<VerifiedProfile>, SiteServiceError> {
        if !self.github.is_configured() {
            return Ok(None);
        }
        // GitHub answers bad codes with 200 + an error body, hence the
        // Option on access_token rather than a status check alone.
        let resp = self
            .http
            .post(GITHUB_TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.github.client_id.as_str()),
                ("client_secret", self.github.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.github.redirect_uri.as_str()),
            ])
            .send()
            .await
            .context("github token exchange")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let token: TokenResponse = resp.json().await.context("decode github token response")?;
        let Some(access_token) = token.access_token else {
            return Ok(None);
        };

        let resp = self
            .http
            .get(GITHUB_USER_URL)
            .bearer_auth(&access_token)
            .send()
            .await
            .context("github user lookup")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let user: GithubUser = resp.json().await.context("decode github user")?;

        // The profile email is often hidden; fall back to the emails API.
        let email = match user.email {
            Some(email) => Some(email),
            None => self.github_primary_email(&access_token).await?,
        };
        let Some(email) = email else {
            return Ok(None);
        };
        Ok(Some(VerifiedProfile {
            name: user.name.unwrap_or(user.login),
            email,
        }))
    }

    async fn github_primary_email(
        &self,
        access_token: &str,
    ) -> Result<Option<String>, SiteServiceError> {
        let resp = self
            .http
            .get(GITHUB_EMAILS_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .context("github emails lookup")?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let emails: Vec<GithubEmail> = resp.json().await.context("decode github emails")?;
        Ok(emails
            .into_iter()
            .find(|e| e.primary && e.verified)
            .map(|e| e.email))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: String,
    name: Option<String>,
    email_verified: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// Deployment environment. Controls log format and whether debug-only
/// response fields (the reset URL) are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Site service configuration loaded from environment variables.
#[derive(Debug)]
pub struct SiteConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session cookies.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Public origin of the site, used to build reset links (e.g. "https://example.com").
    pub public_base_url: String,
    /// TCP port to listen on (default 8080). Env var: `SITE_PORT`.
    pub site_port: u16,
    /// `ENVIRONMENT=production` switches to JSON logs and hides debug fields.
    pub environment: Environment,
    /// Google OAuth client credentials. Empty disables the provider.
    pub google_client_id: String,
    pub google_client_secret: String,
    /// GitHub OAuth client credentials. Empty disables the provider.
    pub github_client_id: String,
    pub github_client_secret: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            public_base_url: std::env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL"),
            site_port: std::env::var("SITE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            environment: match std::env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            google_client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            github_client_id: std::env::var("GITHUB_CLIENT_ID").unwrap_or_default(),
            github_client_secret: std::env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
        }
    }
}

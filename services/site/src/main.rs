use sea_orm::Database;
use tracing::info;

use vitrine_core::tracing::init_tracing;
use vitrine_site::config::SiteConfig;
use vitrine_site::infra::oauth::OAuthCredentials;
use vitrine_site::router::build_router;
use vitrine_site::state::AppState;

#[tokio::main]
async fn main() {
    let config = SiteConfig::from_env();
    init_tracing(config.environment.is_production());

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // GitHub's API rejects requests without a User-Agent.
    let http = reqwest::Client::builder()
        .user_agent("vitrine-site")
        .build()
        .expect("failed to build HTTP client");

    let google = OAuthCredentials {
        client_id: config.google_client_id,
        client_secret: config.google_client_secret,
        redirect_uri: format!("{}/api/auth/callback/google", config.public_base_url),
    };
    let github = OAuthCredentials {
        client_id: config.github_client_id,
        client_secret: config.github_client_secret,
        redirect_uri: format!("{}/api/auth/callback/github", config.public_base_url),
    };

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        public_base_url: config.public_base_url,
        environment: config.environment,
        http,
        google,
        github,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.site_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("site listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

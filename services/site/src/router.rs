use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use vitrine_core::health::{healthz, readyz};
use vitrine_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::guard::page_guard;
use crate::handlers::{
    admin::{
        create_project, delete_project, list_messages, list_users, stats, update_project,
        update_user_access,
    },
    auth::{login, logout, oauth_sign_in, register, session},
    contact::submit_contact,
    password_reset::{forgot_password, reset_password},
    profile::update_profile,
    projects::list_projects,
};
use crate::state::AppState;

/// Page routes are rendered by the frontend deployment, not this service;
/// a guarded request that proceeds ends up here.
async fn page_fallback() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(session))
        .route("/api/auth/oauth/{provider}", post(oauth_sign_in))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        // Profile
        .route("/api/user/update-profile", put(update_profile))
        // Public site
        .route("/api/contact", post(submit_contact))
        .route("/api/projects", get(list_projects))
        // Admin
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/{id}", patch(update_user_access))
        .route("/api/admin/messages", get(list_messages))
        .route("/api/admin/projects", post(create_project))
        .route("/api/admin/projects/{id}", put(update_project))
        .route("/api/admin/projects/{id}", delete(delete_project))
        .fallback(page_fallback)
        // Last layer wraps outermost: set request id, trace, propagate the
        // id onto responses, then guard.
        .layer(middleware::from_fn_with_state(state.clone(), page_guard))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

use anyhow::Context as _;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_domain::user::{AuthProvider, UserRole};
use vitrine_session::cookie::{clear_session_cookie, set_session_cookie};
use vitrine_session::extract::CurrentSession;
use vitrine_session::token::issue_session_token;

use crate::domain::types::User;
use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::account::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::usecase::oauth::{OAuthSignInInput, OAuthSignInUseCase};

/// Public view of an account, embedded in auth responses.
#[derive(Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

fn public_user(user: &User) -> PublicUser {
    PublicUser {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

fn issue_session(
    jar: CookieJar,
    state: &AppState,
    user: &User,
) -> Result<CookieJar, SiteServiceError> {
    let (token, _exp) = issue_session_token(user.id, &user.email, user.role, &state.jwt_secret)
        .context("issue session token")?;
    Ok(set_session_cookie(jar, token, state.cookie_domain.clone()))
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: PublicUser,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user: public_user(&user),
        }),
    ))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    let jar = issue_session(jar, &state, &user)?;
    Ok((
        StatusCode::OK,
        jar,
        Json(LoginResponse {
            user: public_user(&user),
        }),
    ))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    (StatusCode::NO_CONTENT, jar)
}

// ── GET /api/auth/session ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

pub async fn session(CurrentSession(session): CurrentSession) -> impl IntoResponse {
    Json(SessionResponse {
        user_id: session.user_id,
        email: session.email,
        role: session.role,
    })
}

// ── POST /api/auth/oauth/{provider} ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct OAuthRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct OAuthResponse {
    pub user: PublicUser,
}

pub async fn oauth_sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(provider): Path<String>,
    Json(body): Json<OAuthRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let provider = AuthProvider::from_str_tag(&provider)
        .ok_or_else(|| SiteServiceError::Validation("unknown oauth provider".into()))?;
    let usecase = OAuthSignInUseCase {
        users: state.user_repo(),
        verifier: state.oauth_verifier(),
    };
    let user = usecase
        .execute(OAuthSignInInput {
            provider,
            code: body.code,
        })
        .await?;
    let jar = issue_session(jar, &state, &user)?;
    Ok((
        StatusCode::OK,
        jar,
        Json(OAuthResponse {
            user: public_user(&user),
        }),
    ))
}

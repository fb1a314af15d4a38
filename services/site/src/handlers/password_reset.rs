use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::password_reset::{
    FORGOT_PASSWORD_MESSAGE, ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput,
    ResetPasswordUseCase,
};

// ── POST /api/auth/forgot-password ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_url: Option<String>,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        public_base_url: state.public_base_url.clone(),
    };
    let out = usecase
        .execute(ForgotPasswordInput { email: body.email })
        .await?;

    // Always 200 with the same message. In production the body carries
    // nothing else; elsewhere a hit exposes the reset URL for manual testing.
    let reset_url = (!state.environment.is_production())
        .then_some(out.reset_url)
        .flatten();
    Ok(Json(ForgotPasswordResponse {
        message: FORGOT_PASSWORD_MESSAGE,
        reset_url,
    }))
}

// ── POST /api/auth/reset-password ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub success: bool,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            token: body.token,
            password: body.password,
        })
        .await?;
    Ok(Json(ResetPasswordResponse { success: true }))
}

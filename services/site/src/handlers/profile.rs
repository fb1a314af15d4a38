use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

use vitrine_session::extract::CurrentSession;

use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::profile::{UpdateProfileInput, UpdateProfileUseCase};

// ── PUT /api/user/update-profile ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateProfileResponse {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let out = usecase
        .execute(
            session.user_id,
            UpdateProfileInput {
                name: body.name,
                phone: body.phone,
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(UpdateProfileResponse {
        name: out.name,
        email: out.email,
        phone: out.phone,
    }))
}

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SiteServiceError;
use crate::state::AppState;
use crate::usecase::contact::{SubmitContactInput, SubmitContactUseCase};

// ── POST /api/contact ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub id: Uuid,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<impl IntoResponse, SiteServiceError> {
    let usecase = SubmitContactUseCase {
        messages: state.contact_repo(),
    };
    let message = usecase
        .execute(SubmitContactInput {
            name: body.name,
            email: body.email,
            subject: body.subject,
            body: body.message,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            id: message.id,
        }),
    ))
}

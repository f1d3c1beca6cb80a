//! Participant registry endpoints

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use chatdeck_chats::{CreateParticipantInput, Participant};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::format_timestamp;
use crate::error::GatewayResult;
use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            avatar_url: participant.avatar_url,
            description: participant.description,
            created_at: format_timestamp(&participant.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateParticipantRequest {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn create_participant_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/participants", get(list_participants).post(create_participant))
}

#[utoipa::path(
    get,
    path = "/api/participants",
    tag = "Participants",
    responses(
        (status = 200, description = "All participants, newest first", body = Vec<ParticipantResponse>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_participants(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<ParticipantResponse>>> {
    let participants = state.participant_service().get_participants().await?;
    Ok(Json(
        participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/participants",
    tag = "Participants",
    request_body = CreateParticipantRequest,
    responses(
        (status = 201, description = "Participant registered", body = ParticipantResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_participant(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateParticipantRequest>,
) -> GatewayResult<impl IntoResponse> {
    let participant = state
        .participant_service()
        .create_participant(CreateParticipantInput {
            name: payload.name,
            avatar_url: payload.avatar_url,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))))
}

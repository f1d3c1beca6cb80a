//! Chat membership endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chatdeck_chats::{AddParticipantToChatInput, Membership};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::{format_timestamp, ParticipantResponse};
use crate::error::GatewayResult;
use crate::extract::ApiPath;
use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    pub id: i64,
    pub chat_id: i64,
    pub participant_id: i64,
    pub joined_at: String,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id,
            chat_id: membership.chat_id,
            participant_id: membership.participant_id,
            joined_at: format_timestamp(&membership.joined_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    pub chat_id: i64,
    pub participant_id: i64,
}

pub fn create_membership_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/chats/:id/participants", get(list_chat_participants))
        .route(
            "/chats/:id/participants/:participant_id",
            delete(remove_participant),
        )
        .route("/chat-participants", post(add_participant))
}

#[utoipa::path(
    get,
    path = "/api/chats/{id}/participants",
    tag = "Memberships",
    params(
        ("id" = i64, Path, description = "Chat ID")
    ),
    responses(
        (status = 200, description = "Participants of the chat in join order", body = Vec<ParticipantResponse>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_chat_participants(
    ApiPath(chat_id): ApiPath<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<ParticipantResponse>>> {
    let participants = state
        .membership_service()
        .get_chat_participants(chat_id)
        .await?;

    Ok(Json(
        participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/chat-participants",
    tag = "Memberships",
    request_body = AddParticipantRequest,
    responses(
        (status = 201, description = "Participant joined the chat", body = MembershipResponse),
        (status = 404, description = "Chat or participant not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Participant already in chat", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_participant(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<AddParticipantRequest>,
) -> GatewayResult<impl IntoResponse> {
    let membership = state
        .membership_service()
        .add_participant_to_chat(AddParticipantToChatInput {
            chat_id: payload.chat_id,
            participant_id: payload.participant_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MembershipResponse::from(membership))))
}

#[utoipa::path(
    delete,
    path = "/api/chats/{id}/participants/{participant_id}",
    tag = "Memberships",
    params(
        ("id" = i64, Path, description = "Chat ID"),
        ("participant_id" = i64, Path, description = "Participant ID")
    ),
    responses(
        (status = 204, description = "Participant no longer in the chat"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_participant(
    ApiPath((chat_id, participant_id)): ApiPath<(i64, i64)>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<StatusCode> {
    state
        .membership_service()
        .remove_participant_from_chat(chat_id, participant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

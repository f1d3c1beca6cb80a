//! Message REST endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chatdeck_chats::{CreateMessageInput, Message, MessageRole};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::format_timestamp;
use crate::error::GatewayResult;
use crate::extract::ApiPath;
use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub chat_id: i64,
    pub content: String,
    #[schema(value_type = String, example = "user")]
    pub role: MessageRole,
    pub participant_id: Option<i64>,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            content: message.content,
            role: message.role,
            participant_id: message.participant_id,
            created_at: format_timestamp(&message.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    pub chat_id: i64,
    pub content: String,
    /// One of `user`, `assistant`, `system`
    #[schema(value_type = String, example = "user")]
    pub role: MessageRole,
    #[serde(default)]
    pub participant_id: Option<i64>,
}

pub fn create_message_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/chats/:id/messages", get(list_messages))
        .route("/messages", post(create_message))
}

#[utoipa::path(
    get,
    path = "/api/chats/{id}/messages",
    tag = "Messages",
    params(
        ("id" = i64, Path, description = "Chat ID")
    ),
    responses(
        (status = 200, description = "Messages of the chat, oldest first", body = Vec<MessageResponse>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_messages(
    ApiPath(chat_id): ApiPath<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<MessageResponse>>> {
    let messages = state.message_service().get_messages_by_chat(chat_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message appended", body = MessageResponse),
        (status = 404, description = "Chat not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Malformed body or unknown role"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_message(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateMessageRequest>,
) -> GatewayResult<impl IntoResponse> {
    let message = state
        .message_service()
        .create_message(CreateMessageInput {
            chat_id: payload.chat_id,
            content: payload.content,
            role: payload.role,
            participant_id: payload.participant_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

//! Chat REST endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chatdeck_chats::{Chat, ChatType, CreateChatInput, UpdateChatInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::format_timestamp;
use crate::error::{GatewayError, GatewayResult};
use crate::extract::ApiPath;
use crate::state::GatewayState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "group_chat")]
    pub chat_type: ChatType,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            chat_type: chat.chat_type,
            created_at: format_timestamp(&chat.created_at),
            updated_at: format_timestamp(&chat.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateChatRequest {
    pub title: String,
    /// One of `smart_answer`, `group_chat`, `autopilot`
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "smart_answer")]
    pub chat_type: ChatType,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateChatRequest {
    /// New title. Omitting it still refreshes `updated_at`.
    #[serde(default)]
    pub title: Option<String>,
}

/// Create chat routes
pub fn create_chat_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/chats", get(list_chats).post(create_chat))
        .route(
            "/chats/:id",
            get(get_chat).put(update_chat).delete(delete_chat),
        )
}

#[utoipa::path(
    get,
    path = "/api/chats",
    tag = "Chats",
    responses(
        (status = 200, description = "All chats, most recently updated first", body = Vec<ChatResponse>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_chats(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Vec<ChatResponse>>> {
    let chats = state.chat_service().get_chats().await?;
    Ok(Json(chats.into_iter().map(ChatResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/chats",
    tag = "Chats",
    request_body = CreateChatRequest,
    responses(
        (status = 201, description = "Chat created successfully", body = ChatResponse),
        (status = 422, description = "Malformed body or unknown chat type"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_chat(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<CreateChatRequest>,
) -> GatewayResult<impl IntoResponse> {
    let chat = state
        .chat_service()
        .create_chat(CreateChatInput {
            title: payload.title,
            chat_type: payload.chat_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ChatResponse::from(chat))))
}

#[utoipa::path(
    get,
    path = "/api/chats/{id}",
    tag = "Chats",
    params(
        ("id" = i64, Path, description = "Chat ID")
    ),
    responses(
        (status = 200, description = "The chat, or null when it does not exist", body = ChatResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_chat(
    ApiPath(id): ApiPath<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<Option<ChatResponse>>> {
    let chat = state.chat_service().get_chat_by_id(id).await?;
    Ok(Json(chat.map(ChatResponse::from)))
}

#[utoipa::path(
    put,
    path = "/api/chats/{id}",
    tag = "Chats",
    params(
        ("id" = i64, Path, description = "Chat ID")
    ),
    request_body(content = Option<UpdateChatRequest>, description = "Optional; a bodiless request only refreshes `updated_at`"),
    responses(
        (status = 200, description = "Chat updated successfully", body = ChatResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 404, description = "Chat not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_chat(
    ApiPath(id): ApiPath<i64>,
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<UpdateChatRequest>, JsonRejection>,
) -> GatewayResult<Json<ChatResponse>> {
    // a bodiless PUT is a plain touch
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateChatRequest::default(),
        Err(rejection) => return Err(GatewayError::InvalidRequest(rejection.body_text())),
    };

    let chat = state
        .chat_service()
        .update_chat(UpdateChatInput {
            id,
            title: payload.title,
        })
        .await?;

    Ok(Json(ChatResponse::from(chat)))
}

#[utoipa::path(
    delete,
    path = "/api/chats/{id}",
    tag = "Chats",
    params(
        ("id" = i64, Path, description = "Chat ID")
    ),
    responses(
        (status = 204, description = "Chat and its messages and memberships deleted"),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_chat(
    ApiPath(id): ApiPath<i64>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<StatusCode> {
    state.chat_service().delete_chat(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

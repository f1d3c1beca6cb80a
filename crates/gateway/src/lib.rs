//! # Chatdeck Gateway Crate
//!
//! HTTP/JSON surface over the chat services. Every core operation has one
//! route under `/api`; failures come back as `{error, message}` bodies.
//!
//! ## Architecture
//!
//! - **REST**: axum handlers with OpenAPI annotations
//! - **State**: the four services shared behind `Arc`
//! - **Middleware**: CORS and request logging
//!
//! ## Usage
//!
//! ```no_run
//! use chatdeck_gateway::{create_router, GatewayState};
//!
//! # async fn run(db: chatdeck_database::DatabaseConnection) -> std::io::Result<()> {
//! let app = create_router(GatewayState::new(db));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:2022").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::health::health_check,
        rest::chat::list_chats,
        rest::chat::create_chat,
        rest::chat::get_chat,
        rest::chat::update_chat,
        rest::chat::delete_chat,
        rest::message::list_messages,
        rest::message::create_message,
        rest::participant::list_participants,
        rest::participant::create_participant,
        rest::membership::list_chat_participants,
        rest::membership::add_participant,
        rest::membership::remove_participant,
    ),
    components(
        schemas(
            rest::health::HealthResponse,
            rest::chat::ChatResponse,
            rest::chat::CreateChatRequest,
            rest::chat::UpdateChatRequest,
            rest::message::MessageResponse,
            rest::message::CreateMessageRequest,
            rest::participant::ParticipantResponse,
            rest::participant::CreateParticipantRequest,
            rest::membership::MembershipResponse,
            rest::membership::AddParticipantRequest,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Chats", description = "Chat management"),
        (name = "Messages", description = "Per-chat message log"),
        (name = "Participants", description = "Participant registry"),
        (name = "Memberships", description = "Chat membership"),
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/health", get(rest::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_document))
        .nest("/api", rest::create_rest_routes().with_state(state))
        .layer(middleware::create_cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

//! REST API endpoints for the gateway

pub mod chat;
pub mod health;
pub mod membership;
pub mod message;
pub mod participant;

use axum::Router;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

use crate::state::GatewayState;

/// Create all REST API routes, relative to the `/api` prefix
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .merge(chat::create_chat_routes())
        .merge(message::create_message_routes())
        .merge(participant::create_participant_routes())
        .merge(membership::create_membership_routes())
}

/// Wire format for instants: RFC 3339, microseconds, `Z` suffix
pub(crate) fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// Re-export for convenience
pub use chat::*;
pub use health::*;
pub use membership::*;
pub use message::*;
pub use participant::*;

//! Shared application state for the gateway

use std::sync::Arc;

use chatdeck_chats::{ChatService, MembershipService, MessageService, ParticipantService};
use chatdeck_database::DatabaseConnection;

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    pub chat_service: Arc<ChatService>,
    pub message_service: Arc<MessageService>,
    pub participant_service: Arc<ParticipantService>,
    pub membership_service: Arc<MembershipService>,
}

impl GatewayState {
    /// Build every service over one store handle
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_services(
            Arc::new(ChatService::new(db.clone())),
            Arc::new(MessageService::new(db.clone())),
            Arc::new(ParticipantService::new(db.clone())),
            Arc::new(MembershipService::new(db)),
        )
    }

    /// Wrap services that were constructed elsewhere
    pub fn with_services(
        chat_service: Arc<ChatService>,
        message_service: Arc<MessageService>,
        participant_service: Arc<ParticipantService>,
        membership_service: Arc<MembershipService>,
    ) -> Self {
        Self {
            chat_service,
            message_service,
            participant_service,
            membership_service,
        }
    }

    pub fn chat_service(&self) -> &ChatService {
        &self.chat_service
    }

    pub fn message_service(&self) -> &MessageService {
        &self.message_service
    }

    pub fn participant_service(&self) -> &ParticipantService {
        &self.participant_service
    }

    pub fn membership_service(&self) -> &MembershipService {
        &self.membership_service
    }
}

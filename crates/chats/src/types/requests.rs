//! Boundary inputs accepted by the services.

pub use chatdeck_database::{
    AddParticipantToChatInput, CreateChatInput, CreateMessageInput, CreateParticipantInput,
    UpdateChatInput,
};

//! Domain entities for the database layer
//!
//! Row shapes and boundary inputs for the four stored entity types

pub mod chat;
pub mod membership;
pub mod message;
pub mod participant;

// Re-export all entity types
pub use chat::{Chat, ChatType, CreateChatInput, UpdateChatInput};
pub use membership::{AddParticipantToChatInput, Membership};
pub use message::{CreateMessageInput, Message, MessageRole};
pub use participant::{CreateParticipantInput, Participant};

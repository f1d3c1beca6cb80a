//! Shared types and result types for the database layer

pub mod errors;
pub mod timestamp;

// Re-export common types
pub use errors::DatabaseError;

// Common result types
pub type DatabaseResult<T> = Result<T, DatabaseError>;

// Re-export input types from entities
pub use crate::entities::{
    AddParticipantToChatInput, CreateChatInput, CreateMessageInput, CreateParticipantInput,
    UpdateChatInput,
};

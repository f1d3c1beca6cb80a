//! Error types for the chat services.

use chatdeck_database::DatabaseError;
use thiserror::Error;

/// Result type alias for chat operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Failures reported by the chat services. Every named variant carries the
/// offending ids.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat not found: {id}")]
    NotFoundChat { id: i64 },

    #[error("Participant not found: {id}")]
    NotFoundParticipant { id: i64 },

    #[error("Participant {participant_id} is already a member of chat {chat_id}")]
    AlreadyMember { chat_id: i64, participant_id: i64 },

    #[error("Chat not found for update: {id}")]
    NotFoundChatForUpdate { id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ChatError {
    pub fn chat_not_found(id: i64) -> Self {
        Self::NotFoundChat { id }
    }

    pub fn participant_not_found(id: i64) -> Self {
        Self::NotFoundParticipant { id }
    }

    pub fn already_member(chat_id: i64, participant_id: i64) -> Self {
        Self::AlreadyMember {
            chat_id,
            participant_id,
        }
    }
}

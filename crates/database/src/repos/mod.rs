//! Database repository implementations

pub mod chat_repository;
pub mod membership_repository;
pub mod message_repository;
pub mod participant_repository;

// Re-export all repositories for convenience
pub use chat_repository::*;
pub use membership_repository::*;
pub use message_repository::*;
pub use participant_repository::ParticipantRepository;

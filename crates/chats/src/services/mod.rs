//! Business logic services for the chat system.
//!
//! Each service is constructed from a [`chatdeck_database::DatabaseConnection`]
//! and owns the repositories it needs. Services do not call one another.

pub mod chat_service;
pub mod membership_service;
pub mod message_service;
pub mod participant_service;

pub use chat_service::ChatService;
pub use membership_service::MembershipService;
pub use message_service::MessageService;
pub use participant_service::ParticipantService;

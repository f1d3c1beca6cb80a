//! # Chatdeck Chats Crate
//!
//! The service layer over the entity store: chats, their message logs, the
//! participant registry and chat memberships.
//!
//! ## Architecture
//!
//! - **Services**: one per entity kind, each holding its own repositories
//! - **Types**: errors, boundary inputs and operation summaries
//!
//! ## Usage
//!
//! ```no_run
//! use chatdeck_chats::{ChatService, CreateChatInput};
//! use chatdeck_database::ChatType;
//!
//! # async fn run(db: chatdeck_database::DatabaseConnection) -> chatdeck_chats::ChatResult<()> {
//! let service = ChatService::new(db);
//! let chat = service
//!     .create_chat(CreateChatInput {
//!         title: "Standup".to_string(),
//!         chat_type: ChatType::GroupChat,
//!     })
//!     .await?;
//! service.delete_chat(chat.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod services;
pub mod types;

pub use chatdeck_database::{Chat, ChatType, Membership, Message, MessageRole, Participant};
pub use services::{ChatService, MembershipService, MessageService, ParticipantService};
pub use types::{
    AddParticipantToChatInput, ChatError, ChatResult, CreateChatInput, CreateMessageInput,
    CreateParticipantInput, DeletedChat, UpdateChatInput,
};

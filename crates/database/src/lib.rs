//! Chatdeck Database Crate
//!
//! The entity store for chats, messages, participants and memberships:
//! connection management, embedded migrations, entity types and repositories.
//!
//! Repositories expose two flavours of each operation. Methods on `&self` run
//! against the store's own pools; associated `*_tx` functions take a
//! `&mut SqliteConnection` so that several steps can share one transaction
//! obtained from [`DatabaseConnection::begin`].

use chatdeck_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

// Re-export repositories
pub use repos::{ChatRepository, MembershipRepository, MessageRepository, ParticipantRepository};

// Re-export entities
pub use entities::{
    chat::{Chat, ChatType, CreateChatInput, UpdateChatInput},
    membership::{AddParticipantToChatInput, Membership},
    message::{CreateMessageInput, Message, MessageRole},
    participant::{CreateParticipantInput, Participant},
};

// Re-export types
pub use types::{errors::DatabaseError, DatabaseResult};

/// Re-export commonly used types for convenience
pub use sqlx::{SqliteConnection, SqlitePool};

/// Open the store and bring its schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<DatabaseConnection> {
    let connection = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(connection.writer())
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(connection)
}

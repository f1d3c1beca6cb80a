//! Message service for the append-only message log of each chat.

use chatdeck_database::{
    ChatRepository, CreateMessageInput, DatabaseConnection, DatabaseError, Message,
    MessageRepository,
};

use crate::types::{ChatError, ChatResult};

/// Service for managing message operations
#[derive(Clone)]
pub struct MessageService {
    db: DatabaseConnection,
    message_repository: MessageRepository,
}

impl MessageService {
    /// Create a new message service instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            message_repository: MessageRepository::new(db.clone()),
            db,
        }
    }

    /// Append a message to an existing chat.
    ///
    /// `participant_id` is stored without checking that it resolves.
    pub async fn create_message(&self, input: CreateMessageInput) -> ChatResult<Message> {
        let mut tx = self.db.begin().await?;

        if ChatRepository::find_by_id_tx(&mut tx, input.chat_id).await?.is_none() {
            return Err(ChatError::chat_not_found(input.chat_id));
        }

        let message = match MessageRepository::create_tx(&mut tx, &input).await {
            Ok(message) => message,
            Err(DatabaseError::ForeignKey(_)) => return Err(ChatError::chat_not_found(input.chat_id)),
            Err(e) => return Err(e.into()),
        };

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(message)
    }

    /// Messages of a chat in the order they were written. Unknown chats yield
    /// an empty list.
    pub async fn get_messages_by_chat(&self, chat_id: i64) -> ChatResult<Vec<Message>> {
        Ok(self.message_repository.list_by_chat(chat_id).await?)
    }

    pub async fn count_messages(&self, chat_id: i64) -> ChatResult<i64> {
        Ok(self.message_repository.count_by_chat(chat_id).await?)
    }
}

//! Chat service for managing chat operations.

use chatdeck_database::{
    Chat, ChatRepository, CreateChatInput, DatabaseConnection, DatabaseError, MembershipRepository,
    MessageRepository, UpdateChatInput,
};
use tracing::info;

use crate::types::{ChatError, ChatResult, DeletedChat};

/// Service for managing chat operations
#[derive(Clone)]
pub struct ChatService {
    db: DatabaseConnection,
    chat_repository: ChatRepository,
}

impl ChatService {
    /// Create a new chat service instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            chat_repository: ChatRepository::new(db.clone()),
            db,
        }
    }

    /// Create a new chat
    pub async fn create_chat(&self, input: CreateChatInput) -> ChatResult<Chat> {
        Ok(self.chat_repository.create(&input).await?)
    }

    /// All chats, most recently updated first
    pub async fn get_chats(&self) -> ChatResult<Vec<Chat>> {
        Ok(self.chat_repository.list_by_recent_activity().await?)
    }

    pub async fn get_chat_by_id(&self, id: i64) -> ChatResult<Option<Chat>> {
        Ok(self.chat_repository.find_by_id(id).await?)
    }

    /// Rename a chat and touch its `updated_at`.
    ///
    /// `updated_at` moves even when no title is supplied.
    pub async fn update_chat(&self, input: UpdateChatInput) -> ChatResult<Chat> {
        let mut tx = self.db.begin().await?;

        let chat = ChatRepository::touch_tx(&mut tx, input.id, input.title.as_deref())
            .await?
            .ok_or(ChatError::NotFoundChatForUpdate { id: input.id })?;

        tx.commit().await.map_err(DatabaseError::from)?;

        info!(
            chat_id = chat.id,
            title_changed = input.title.is_some(),
            "updated chat"
        );
        Ok(chat)
    }

    /// Delete a chat together with its messages and memberships.
    ///
    /// All three deletes share one transaction. Deleting a chat that does not
    /// exist succeeds and reports `chat_existed = false`.
    pub async fn delete_chat(&self, id: i64) -> ChatResult<DeletedChat> {
        let mut tx = self.db.begin().await?;

        let messages_removed = MessageRepository::delete_by_chat_tx(&mut tx, id).await?;
        let memberships_removed = MembershipRepository::delete_by_chat_tx(&mut tx, id).await?;
        let chat_existed = ChatRepository::delete_tx(&mut tx, id).await?;

        tx.commit().await.map_err(DatabaseError::from)?;

        let summary = DeletedChat {
            chat_existed,
            messages_removed,
            memberships_removed,
        };

        info!(
            chat_id = id,
            chat_existed = summary.chat_existed,
            messages_removed = summary.messages_removed,
            memberships_removed = summary.memberships_removed,
            "deleted chat"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_database;
    use chatdeck_database::ChatType;

    fn input(title: &str) -> CreateChatInput {
        CreateChatInput {
            title: title.to_string(),
            chat_type: ChatType::SmartAnswer,
        }
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (db, _temp_dir) = create_test_database().await;
        let service = ChatService::new(db);

        assert!(service.get_chats().await.unwrap().is_empty());
        assert_eq!(service.get_chat_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_with_title_renames() {
        let (db, _temp_dir) = create_test_database().await;
        let service = ChatService::new(db);

        let chat = service.create_chat(input("Draft")).await.unwrap();
        let updated = service
            .update_chat(UpdateChatInput {
                id: chat.id,
                title: Some("Final".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.chat_type, chat.chat_type);
        assert!(updated.updated_at > chat.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_chat_fails() {
        let (db, _temp_dir) = create_test_database().await;
        let service = ChatService::new(db);

        let error = service
            .update_chat(UpdateChatInput { id: 5, title: None })
            .await
            .unwrap_err();
        assert!(matches!(error, ChatError::NotFoundChatForUpdate { id: 5 }));
    }

    #[tokio::test]
    async fn test_delete_missing_chat_is_idempotent() {
        let (db, _temp_dir) = create_test_database().await;
        let service = ChatService::new(db);

        let summary = service.delete_chat(42).await.unwrap();
        assert_eq!(summary, DeletedChat::default());
        assert_eq!(service.delete_chat(42).await.unwrap(), DeletedChat::default());
    }
}

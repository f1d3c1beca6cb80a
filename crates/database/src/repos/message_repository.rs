//! Repository for message data access operations.

use crate::connection::DatabaseConnection;
use crate::entities::{CreateMessageInput, Message, MessageRole};
use crate::types::{timestamp, DatabaseError, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::info;

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    db: DatabaseConnection,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append a message to a chat's log.
    ///
    /// The chat reference is enforced by the foreign key; a dangling `chat_id`
    /// surfaces as [`DatabaseError::ForeignKey`]. `participant_id` is stored
    /// as given.
    pub async fn create_tx(
        conn: &mut SqliteConnection,
        request: &CreateMessageInput,
    ) -> DatabaseResult<Message> {
        let now = timestamp::now();

        let result = sqlx::query(
            "INSERT INTO messages (chat_id, content, role, participant_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.chat_id)
        .bind(&request.content)
        .bind(request.role.as_str())
        .bind(request.participant_id)
        .bind(timestamp::encode(&now))
        .execute(&mut *conn)
        .await?;

        let message_id = result.last_insert_rowid();

        info!(
            message_id = message_id,
            chat_id = request.chat_id,
            role = %request.role,
            participant_id = ?request.participant_id,
            "created new message"
        );

        Ok(Message {
            id: message_id,
            chat_id: request.chat_id,
            content: request.content.clone(),
            role: request.role,
            participant_id: request.participant_id,
            created_at: now,
        })
    }

    /// Messages of a chat, oldest first
    pub async fn list_by_chat(&self, chat_id: i64) -> DatabaseResult<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, chat_id, content, role, participant_id, created_at
             FROM messages WHERE chat_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(chat_id)
        .fetch_all(self.db.reader())
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    /// Count messages in a chat
    pub async fn count_by_chat(&self, chat_id: i64) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(self.db.reader())
            .await?;
        Ok(count)
    }

    /// Remove every message of a chat, returning how many were removed
    pub async fn delete_by_chat_tx(conn: &mut SqliteConnection, chat_id: i64) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

fn message_from_row(row: &SqliteRow) -> DatabaseResult<Message> {
    let role: String = row.try_get("role")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Message {
        id: row.try_get("id")?,
        chat_id: row.try_get("chat_id")?,
        content: row.try_get("content")?,
        role: role.parse::<MessageRole>().map_err(DatabaseError::InvalidData)?,
        participant_id: row.try_get("participant_id")?,
        created_at: timestamp::decode(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ChatType, CreateChatInput};
    use crate::repos::ChatRepository;
    use crate::test_support::create_test_database;

    async fn seed_chat(db: &DatabaseConnection) -> i64 {
        ChatRepository::new(db.clone())
            .create(&CreateChatInput {
                title: "Messages".to_string(),
                chat_type: ChatType::GroupChat,
            })
            .await
            .unwrap()
            .id
    }

    fn message(chat_id: i64, content: &str, participant_id: Option<i64>) -> CreateMessageInput {
        CreateMessageInput {
            chat_id,
            content: content.to_string(),
            role: MessageRole::User,
            participant_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let (db, _temp_dir) = create_test_database().await;
        let chat_id = seed_chat(&db).await;
        let repo = MessageRepository::new(db.clone());

        let mut conn = db.writer().acquire().await.unwrap();
        for content in ["m1", "m2", "m3"] {
            MessageRepository::create_tx(&mut conn, &message(chat_id, content, None))
                .await
                .unwrap();
        }
        drop(conn);

        let contents: Vec<String> = repo
            .list_by_chat(chat_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["m1", "m2", "m3"]);
        assert_eq!(repo.count_by_chat(chat_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_dangling_chat_is_rejected_by_foreign_key() {
        let (db, _temp_dir) = create_test_database().await;
        let mut conn = db.writer().acquire().await.unwrap();

        let error = MessageRepository::create_tx(&mut conn, &message(999, "orphan", None))
            .await
            .unwrap_err();
        assert!(matches!(error, DatabaseError::ForeignKey(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn test_unresolved_participant_is_stored_as_given() {
        let (db, _temp_dir) = create_test_database().await;
        let chat_id = seed_chat(&db).await;

        let mut conn = db.writer().acquire().await.unwrap();
        let created = MessageRepository::create_tx(&mut conn, &message(chat_id, "hi", Some(77)))
            .await
            .unwrap();
        drop(conn);

        let listed = MessageRepository::new(db).list_by_chat(chat_id).await.unwrap();
        assert_eq!(listed, vec![created]);
        assert_eq!(listed[0].participant_id, Some(77));
    }
}

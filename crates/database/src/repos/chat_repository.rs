//! Repository for chat data access operations.

use crate::connection::DatabaseConnection;
use crate::entities::{Chat, ChatType, CreateChatInput};
use crate::types::{timestamp, DatabaseError, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::info;

const CHAT_COLUMNS: &str = "id, title, chat_type, created_at, updated_at";

/// Repository for chat database operations
#[derive(Clone)]
pub struct ChatRepository {
    db: DatabaseConnection,
}

impl ChatRepository {
    /// Create a new chat repository
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new chat
    pub async fn create(&self, request: &CreateChatInput) -> DatabaseResult<Chat> {
        let now = timestamp::now();
        let stamp = timestamp::encode(&now);

        let result = sqlx::query(
            "INSERT INTO chats (title, chat_type, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.title)
        .bind(request.chat_type.as_str())
        .bind(&stamp)
        .bind(&stamp)
        .execute(self.db.writer())
        .await?;

        let chat_id = result.last_insert_rowid();

        info!(
            chat_id = chat_id,
            chat_type = %request.chat_type,
            "created new chat"
        );

        Ok(Chat {
            id: chat_id,
            title: request.title.clone(),
            chat_type: request.chat_type,
            created_at: now,
            updated_at: now,
        })
    }

    /// Find chat by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Chat>> {
        let mut conn = self.db.reader().acquire().await?;
        Self::find_by_id_tx(&mut conn, id).await
    }

    /// Find chat by ID on a caller-provided connection
    pub async fn find_by_id_tx(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<Option<Chat>> {
        let row = sqlx::query(&format!("SELECT {CHAT_COLUMNS} FROM chats WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.as_ref().map(chat_from_row).transpose()
    }

    /// All chats, most recently updated first
    pub async fn list_by_recent_activity(&self) -> DatabaseResult<Vec<Chat>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHAT_COLUMNS} FROM chats ORDER BY updated_at DESC, id DESC"
        ))
        .fetch_all(self.db.reader())
        .await?;

        rows.iter().map(chat_from_row).collect()
    }

    /// Touch `updated_at` and optionally replace the title.
    ///
    /// Returns `None` when the chat does not exist. The new `updated_at` is
    /// always strictly later than the stored one.
    pub async fn touch_tx(
        conn: &mut SqliteConnection,
        id: i64,
        title: Option<&str>,
    ) -> DatabaseResult<Option<Chat>> {
        let Some(current) = Self::find_by_id_tx(conn, id).await? else {
            return Ok(None);
        };

        let updated_at = timestamp::advance_past(current.updated_at);
        let title = title.map(str::to_owned).unwrap_or(current.title);

        sqlx::query("UPDATE chats SET title = ?, updated_at = ? WHERE id = ?")
            .bind(&title)
            .bind(timestamp::encode(&updated_at))
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(Some(Chat {
            title,
            updated_at,
            ..current
        }))
    }

    /// Delete the chat row only. Dependent rows must already be gone or the
    /// foreign keys reject the statement.
    pub async fn delete_tx(conn: &mut SqliteConnection, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all chats
    pub async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(self.db.reader())
            .await?;
        Ok(count)
    }
}

fn chat_from_row(row: &SqliteRow) -> DatabaseResult<Chat> {
    let chat_type: String = row.try_get("chat_type")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Chat {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        chat_type: chat_type
            .parse::<ChatType>()
            .map_err(DatabaseError::InvalidData)?,
        created_at: timestamp::decode(&created_at)?,
        updated_at: timestamp::decode(&updated_at)?,
    })
}

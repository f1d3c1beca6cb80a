//! Repository for chat membership data access operations.

use crate::connection::DatabaseConnection;
use crate::entities::{AddParticipantToChatInput, Membership, Participant};
use crate::repos::participant_repository::participant_from_row;
use crate::types::{timestamp, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::{info, warn};

/// Repository for chat membership operations
#[derive(Clone)]
pub struct MembershipRepository {
    db: DatabaseConnection,
}

impl MembershipRepository {
    /// Create a new membership repository
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a membership.
    ///
    /// A second row for the same pair fails with
    /// [`DatabaseError::Duplicate`](crate::DatabaseError::Duplicate); unknown
    /// chat or participant ids fail with
    /// [`DatabaseError::ForeignKey`](crate::DatabaseError::ForeignKey).
    pub async fn create_tx(
        conn: &mut SqliteConnection,
        request: AddParticipantToChatInput,
    ) -> DatabaseResult<Membership> {
        let now = timestamp::now();

        let result = sqlx::query(
            "INSERT INTO chat_participants (chat_id, participant_id, joined_at) VALUES (?, ?, ?)",
        )
        .bind(request.chat_id)
        .bind(request.participant_id)
        .bind(timestamp::encode(&now))
        .execute(&mut *conn)
        .await?;

        let membership_id = result.last_insert_rowid();

        info!(
            membership_id = membership_id,
            chat_id = request.chat_id,
            participant_id = request.participant_id,
            "added participant to chat"
        );

        Ok(Membership {
            id: membership_id,
            chat_id: request.chat_id,
            participant_id: request.participant_id,
            joined_at: now,
        })
    }

    /// Membership row for a (chat, participant) pair
    pub async fn find_by_pair_tx(
        conn: &mut SqliteConnection,
        chat_id: i64,
        participant_id: i64,
    ) -> DatabaseResult<Option<Membership>> {
        let row = sqlx::query(
            "SELECT id, chat_id, participant_id, joined_at
             FROM chat_participants WHERE chat_id = ? AND participant_id = ?",
        )
        .bind(chat_id)
        .bind(participant_id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(membership_from_row).transpose()
    }

    /// Membership rows of a chat in join order
    pub async fn list_by_chat(&self, chat_id: i64) -> DatabaseResult<Vec<Membership>> {
        let rows = sqlx::query(
            "SELECT id, chat_id, participant_id, joined_at
             FROM chat_participants WHERE chat_id = ? ORDER BY joined_at ASC, id ASC",
        )
        .bind(chat_id)
        .fetch_all(self.db.reader())
        .await?;

        rows.iter().map(membership_from_row).collect()
    }

    /// Participant records of a chat's members in join order
    pub async fn list_participants_by_chat(&self, chat_id: i64) -> DatabaseResult<Vec<Participant>> {
        let rows = sqlx::query(
            "SELECT p.id, p.name, p.avatar_url, p.description, p.created_at
             FROM chat_participants cp
             JOIN participants p ON p.id = cp.participant_id
             WHERE cp.chat_id = ?
             ORDER BY cp.joined_at ASC, cp.id ASC",
        )
        .bind(chat_id)
        .fetch_all(self.db.reader())
        .await?;

        rows.iter().map(participant_from_row).collect()
    }

    /// Remove the membership for a pair. Returns whether a row was removed.
    pub async fn delete_by_pair(&self, chat_id: i64, participant_id: i64) -> DatabaseResult<bool> {
        let result =
            sqlx::query("DELETE FROM chat_participants WHERE chat_id = ? AND participant_id = ?")
                .bind(chat_id)
                .bind(participant_id)
                .execute(self.db.writer())
                .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(chat_id = chat_id, participant_id = participant_id, "removed participant from chat");
        } else {
            warn!(chat_id = chat_id, participant_id = participant_id, "no membership to remove");
        }

        Ok(removed)
    }

    /// Remove every membership of a chat, returning how many were removed
    pub async fn delete_by_chat_tx(conn: &mut SqliteConnection, chat_id: i64) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM chat_participants WHERE chat_id = ?")
            .bind(chat_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_by_chat(&self, chat_id: i64) -> DatabaseResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM chat_participants WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_one(self.db.reader())
                .await?;
        Ok(count)
    }
}

fn membership_from_row(row: &SqliteRow) -> DatabaseResult<Membership> {
    let joined_at: String = row.try_get("joined_at")?;

    Ok(Membership {
        id: row.try_get("id")?,
        chat_id: row.try_get("chat_id")?,
        participant_id: row.try_get("participant_id")?,
        joined_at: timestamp::decode(&joined_at)?,
    })
}

//! Repository for participant data access operations.

use crate::connection::DatabaseConnection;
use crate::entities::{CreateParticipantInput, Participant};
use crate::types::{timestamp, DatabaseResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::info;

/// Repository for the global participant registry
#[derive(Clone)]
pub struct ParticipantRepository {
    db: DatabaseConnection,
}

impl ParticipantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a participant
    pub async fn create(&self, request: &CreateParticipantInput) -> DatabaseResult<Participant> {
        let now = timestamp::now();

        let result = sqlx::query(
            "INSERT INTO participants (name, avatar_url, description, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.avatar_url)
        .bind(&request.description)
        .bind(timestamp::encode(&now))
        .execute(self.db.writer())
        .await?;

        let participant_id = result.last_insert_rowid();
        info!(participant_id = participant_id, name = %request.name, "created new participant");

        Ok(Participant {
            id: participant_id,
            name: request.name.clone(),
            avatar_url: request.avatar_url.clone(),
            description: request.description.clone(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Participant>> {
        let mut conn = self.db.reader().acquire().await?;
        Self::find_by_id_tx(&mut conn, id).await
    }

    pub async fn find_by_id_tx(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> DatabaseResult<Option<Participant>> {
        let row = sqlx::query(
            "SELECT id, name, avatar_url, description, created_at FROM participants WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        row.as_ref().map(participant_from_row).transpose()
    }

    /// Every participant, newest first
    pub async fn list_newest_first(&self) -> DatabaseResult<Vec<Participant>> {
        let rows = sqlx::query(
            "SELECT id, name, avatar_url, description, created_at
             FROM participants ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.db.reader())
        .await?;

        rows.iter().map(participant_from_row).collect()
    }
}

/// Shared with the membership join, which selects the same column names.
pub(crate) fn participant_from_row(row: &SqliteRow) -> DatabaseResult<Participant> {
    let created_at: String = row.try_get("created_at")?;

    Ok(Participant {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
        description: row.try_get("description")?,
        created_at: timestamp::decode(&created_at)?,
    })
}

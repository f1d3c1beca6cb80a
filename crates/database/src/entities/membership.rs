//! Membership entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Join record between a chat and a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub chat_id: i64,
    pub participant_id: i64,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParticipantToChatInput {
    pub chat_id: i64,
    pub participant_id: i64,
}

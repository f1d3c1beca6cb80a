//! Membership service joining participants to chats.

use chatdeck_database::{
    AddParticipantToChatInput, ChatRepository, DatabaseConnection, DatabaseError, Membership,
    MembershipRepository, Participant, ParticipantRepository,
};
use tracing::warn;

use crate::types::{ChatError, ChatResult};

/// Service for managing chat memberships
#[derive(Clone)]
pub struct MembershipService {
    db: DatabaseConnection,
    membership_repository: MembershipRepository,
}

impl MembershipService {
    /// Create a new membership service instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            membership_repository: MembershipRepository::new(db.clone()),
            db,
        }
    }

    /// Join a participant to a chat.
    ///
    /// Checks run in order inside one write transaction: the chat must exist,
    /// then the participant, then the pair must not already be joined.
    pub async fn add_participant_to_chat(
        &self,
        input: AddParticipantToChatInput,
    ) -> ChatResult<Membership> {
        let AddParticipantToChatInput {
            chat_id,
            participant_id,
        } = input;

        let mut tx = self.db.begin().await?;

        if ChatRepository::find_by_id_tx(&mut tx, chat_id).await?.is_none() {
            return Err(ChatError::chat_not_found(chat_id));
        }

        if ParticipantRepository::find_by_id_tx(&mut tx, participant_id)
            .await?
            .is_none()
        {
            return Err(ChatError::participant_not_found(participant_id));
        }

        if MembershipRepository::find_by_pair_tx(&mut tx, chat_id, participant_id)
            .await?
            .is_some()
        {
            warn!(chat_id = chat_id, participant_id = participant_id, "participant already in chat");
            return Err(ChatError::already_member(chat_id, participant_id));
        }

        let membership = match MembershipRepository::create_tx(&mut tx, input).await {
            Ok(membership) => membership,
            Err(DatabaseError::Duplicate(_)) => {
                return Err(ChatError::already_member(chat_id, participant_id))
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await.map_err(DatabaseError::from)?;
        Ok(membership)
    }

    /// Remove a participant from a chat. Returns whether a membership existed;
    /// removing an absent pair is not an error.
    pub async fn remove_participant_from_chat(
        &self,
        chat_id: i64,
        participant_id: i64,
    ) -> ChatResult<bool> {
        Ok(self
            .membership_repository
            .delete_by_pair(chat_id, participant_id)
            .await?)
    }

    /// Participants of a chat in join order
    pub async fn get_chat_participants(&self, chat_id: i64) -> ChatResult<Vec<Participant>> {
        Ok(self
            .membership_repository
            .list_participants_by_chat(chat_id)
            .await?)
    }

    /// Membership rows of a chat in join order
    pub async fn get_memberships(&self, chat_id: i64) -> ChatResult<Vec<Membership>> {
        Ok(self.membership_repository.list_by_chat(chat_id).await?)
    }
}

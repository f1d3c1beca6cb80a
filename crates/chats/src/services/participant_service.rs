//! Participant service for the global participant registry.

use chatdeck_database::{
    CreateParticipantInput, DatabaseConnection, Participant, ParticipantRepository,
};

use crate::types::ChatResult;

/// Service for managing participants independent of any chat
#[derive(Clone)]
pub struct ParticipantService {
    participant_repository: ParticipantRepository,
}

impl ParticipantService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            participant_repository: ParticipantRepository::new(db),
        }
    }

    pub async fn create_participant(&self, input: CreateParticipantInput) -> ChatResult<Participant> {
        Ok(self.participant_repository.create(&input).await?)
    }

    /// All participants, newest first
    pub async fn get_participants(&self) -> ChatResult<Vec<Participant>> {
        Ok(self.participant_repository.list_newest_first().await?)
    }

    pub async fn get_participant_by_id(&self, id: i64) -> ChatResult<Option<Participant>> {
        Ok(self.participant_repository.find_by_id(id).await?)
    }
}

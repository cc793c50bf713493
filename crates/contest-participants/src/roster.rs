//! The participant roster.
//!
//! The [`ParticipantRoster`] owns every participant. Contests only hold
//! [`ParticipantId`] references into it, so one participant can be
//! referenced by any number of contests without shared ownership.

use std::collections::BTreeMap;

use contest_types::{Identity, ParticipantId};
use tracing::debug;

use crate::error::ParticipantError;
use crate::participant::Participant;

/// Owns all participants, in enrollment order.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRoster {
    /// Enrollment order.
    order: Vec<ParticipantId>,
    /// Participants keyed by ID.
    participants: BTreeMap<ParticipantId, Participant>,
}

impl ParticipantRoster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            participants: BTreeMap::new(),
        }
    }

    /// Enroll a new participant in the `Initial` standing and return its ID.
    pub fn enroll(&mut self, identity: Identity) -> ParticipantId {
        let participant = Participant::new(identity);
        let id = participant.id();
        debug!(participant = %id, name = participant.name(), "Participant enrolled");
        self.order.push(id);
        self.participants.insert(id, participant);
        id
    }

    /// Look up a participant.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// Look up a participant for mutation.
    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(&id)
    }

    /// Look up a participant, failing if it is not enrolled.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError::NotFound`] for an unknown ID.
    pub fn participant(&self, id: ParticipantId) -> Result<&Participant, ParticipantError> {
        self.get(id).ok_or(ParticipantError::NotFound(id))
    }

    /// Look up a participant for mutation, failing if it is not enrolled.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError::NotFound`] for an unknown ID.
    pub fn participant_mut(
        &mut self,
        id: ParticipantId,
    ) -> Result<&mut Participant, ParticipantError> {
        self.get_mut(id).ok_or(ParticipantError::NotFound(id))
    }

    /// Find the first participant enrolled under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<ParticipantId> {
        self.iter().find(|p| p.name() == name).map(Participant::id)
    }

    /// Iterate participants in enrollment order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.order.iter().filter_map(|id| self.participants.get(id))
    }

    /// Enrollment order of participant IDs.
    pub fn ids(&self) -> &[ParticipantId] {
        &self.order
    }

    /// Number of enrolled participants.
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no participant is enrolled.
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

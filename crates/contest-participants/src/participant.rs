//! A single participant and its reaction to contest phase changes.
//!
//! The participant owns its standing and drives it through the
//! [`lifecycle`](crate::lifecycle) table. Entering `Registered` starts a new
//! participation cycle: the artifact is cleared, eligibility restored, and
//! the rating zeroed.

use contest_types::{Artifact, ContestPhase, Identity, ParticipantId, Report, Standing};
use tracing::debug;

use crate::error::ParticipantError;
use crate::lifecycle::{self, Transition};

/// A contest participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Roster identifier.
    id: ParticipantId,
    /// Name and contact channels.
    identity: Identity,
    /// Current lifecycle standing.
    standing: Standing,
    /// Submitted artifact for the current cycle.
    artifact: Option<Artifact>,
    /// Whether the artifact survived duplicate detection.
    eligible: bool,
    /// Rating recorded during the vote.
    rating: i32,
}

impl Participant {
    /// Create a participant in the `Initial` standing.
    pub fn new(identity: Identity) -> Self {
        Self::with_id(ParticipantId::new(), identity)
    }

    /// Create a participant with an explicit ID.
    pub const fn with_id(id: ParticipantId, identity: Identity) -> Self {
        Self {
            id,
            identity,
            standing: Standing::Initial,
            artifact: None,
            eligible: true,
            rating: 0,
        }
    }

    /// Roster identifier.
    pub const fn id(&self) -> ParticipantId {
        self.id
    }

    /// Name and contact channels.
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Current standing.
    pub const fn standing(&self) -> Standing {
        self.standing
    }

    /// Artifact submitted in the current cycle.
    pub const fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Whether the artifact survived duplicate detection.
    pub const fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Rating recorded during the vote.
    pub const fn rating(&self) -> i32 {
        self.rating
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Apply `advance` and return the new standing.
    pub fn advance(&mut self) -> Standing {
        self.transition(Transition::Advance)
    }

    /// Apply `reject` and return the new standing.
    pub fn reject(&mut self) -> Standing {
        self.transition(Transition::Reject)
    }

    fn transition(&mut self, transition: Transition) -> Standing {
        let from = self.standing;
        let to = lifecycle::apply(from, transition);
        if from == Standing::Initial && to == Standing::Registered {
            self.artifact = None;
            self.eligible = true;
            self.rating = 0;
        }
        self.standing = to;
        if from != to {
            debug!(participant = %self.id, ?transition, %from, %to, "Standing changed");
        }
        to
    }

    // -----------------------------------------------------------------------
    // Data
    // -----------------------------------------------------------------------

    /// Attach an artifact and move from `Registered` to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError::SubmissionNotAllowed`] outside the
    /// `Registered` standing; nothing is changed in that case.
    pub fn submit_artifact(&mut self, artifact: Artifact) -> Result<(), ParticipantError> {
        if self.standing != Standing::Registered {
            return Err(ParticipantError::SubmissionNotAllowed {
                standing: self.standing,
            });
        }
        self.artifact = Some(artifact);
        self.advance();
        Ok(())
    }

    /// Clear the eligibility flag. There is no way to set it again short of
    /// starting a new cycle.
    pub const fn disqualify(&mut self) {
        self.eligible = false;
    }

    /// Record the vote rating.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError::RatingNotAllowed`] unless the participant
    /// is `Promoted`.
    pub const fn record_rating(&mut self, rating: i32) -> Result<(), ParticipantError> {
        if !matches!(self.standing, Standing::Promoted) {
            return Err(ParticipantError::RatingNotAllowed {
                standing: self.standing,
            });
        }
        self.rating = rating;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Broadcast reaction
    // -----------------------------------------------------------------------

    /// React to a phase broadcast.
    ///
    /// The reaction reads only this participant's own data, so the outcome
    /// does not depend on the order subscribers are visited in. Returns the
    /// status report for the reaction, if there is one.
    pub fn react(&mut self, phase: ContestPhase) -> Option<Report> {
        match phase {
            ContestPhase::Review => Some(self.on_review()),
            ContestPhase::Vote => self.on_vote(),
            ContestPhase::Awarding => self.on_awarding(),
            ContestPhase::Application | ContestPhase::Closed => None,
        }
    }

    fn on_review(&mut self) -> Report {
        if self.artifact.is_none() {
            self.reject();
            Report::MissingSubmission {
                identity: self.identity.clone(),
            }
        } else {
            Report::UnderReview {
                identity: self.identity.clone(),
            }
        }
    }

    fn on_vote(&mut self) -> Option<Report> {
        if self.standing != Standing::Submitted {
            return None;
        }
        let identity = self.identity.clone();
        if self.eligible {
            self.advance();
            Some(Report::AcceptedForVoting { identity })
        } else {
            self.reject();
            Some(Report::FailedReview { identity })
        }
    }

    fn on_awarding(&mut self) -> Option<Report> {
        match self.standing {
            Standing::Promoted => Some(Report::RatingReported {
                identity: self.identity.clone(),
                rating: self.rating,
            }),
            Standing::Winner => {
                let report = Report::WinnerAnnounced {
                    identity: self.identity.clone(),
                };
                self.advance();
                Some(report)
            }
            Standing::Failed => {
                self.advance();
                Some(Report::ParticipantReset {
                    identity: self.identity.clone(),
                })
            }
            Standing::Initial | Standing::Registered | Standing::Submitted => None,
        }
    }
}

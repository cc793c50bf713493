//! The contest aggregate.
//!
//! A [`Contest`] composes the [`PhaseMachine`] with the ordered subscriber
//! list and the winning-rating threshold of one event instance. It owns
//! its subscribers as [`ParticipantId`] references; the participants
//! themselves live in a [`ParticipantRoster`] passed in by the caller.
//!
//! # Broadcast
//!
//! [`Contest::broadcast`] borrows the subscriber list immutably for its
//! whole duration. A reaction receives only its own participant, so it can
//! never add to or reorder the list being iterated.

use chrono::{DateTime, Utc};
use contest_participants::{Participant, ParticipantRoster};
use contest_types::{ContestId, ContestPhase, ParticipantId, RegistrationRefusal, Report, Session};
use tracing::{debug, info, warn};

use crate::phase::{PhaseChange, PhaseMachine};
use crate::sink::ReportSink;

/// Errors raised by contest-level operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContestError {
    /// A registration attempt was refused.
    #[error("registration refused: {refusal}")]
    RegistrationRefused {
        /// Why it was refused.
        refusal: RegistrationRefusal,
    },

    /// A session was invoked in the wrong phase.
    #[error("{session} session cannot run during the {phase} phase")]
    SessionOutOfOrder {
        /// The refused session.
        session: Session,
        /// The phase the contest was in.
        phase: ContestPhase,
    },
}

/// One contest instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    /// Unique identifier.
    id: ContestId,
    /// Immutable topic label.
    topic: String,
    /// Phase state.
    phase: PhaseMachine,
    /// Highest rating cast during the vote; 0 until then.
    winning_rating: i32,
    /// Subscribers in registration order. Append-only.
    subscribers: Vec<ParticipantId>,
    /// When the contest was created.
    opened_at: DateTime<Utc>,
}

impl Contest {
    /// Create a contest in the `Application` phase.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            id: ContestId::new(),
            topic: topic.into(),
            phase: PhaseMachine::new(),
            winning_rating: 0,
            subscribers: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// Unique identifier.
    pub const fn id(&self) -> ContestId {
        self.id
    }

    /// Topic label.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Current phase.
    pub const fn phase(&self) -> ContestPhase {
        self.phase.phase()
    }

    /// Highest rating cast in the last voting session.
    pub const fn winning_rating(&self) -> i32 {
        self.winning_rating
    }

    /// Subscribers in registration order.
    pub fn subscribers(&self) -> &[ParticipantId] {
        &self.subscribers
    }

    /// Whether `id` is subscribed.
    pub fn is_subscribed(&self, id: ParticipantId) -> bool {
        self.subscribers.contains(&id)
    }

    /// Creation time.
    pub const fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub(crate) const fn set_winning_rating(&mut self, rating: i32) {
        self.winning_rating = rating;
    }

    /// Refuse with [`ContestError::SessionOutOfOrder`] unless the contest is
    /// in the phase `session` expects.
    pub fn ensure_phase(&self, session: Session) -> Result<(), ContestError> {
        let phase = self.phase();
        if phase == session.expected_phase() {
            Ok(())
        } else {
            Err(ContestError::SessionOutOfOrder { session, phase })
        }
    }

    // -----------------------------------------------------------------------
    // Phase
    // -----------------------------------------------------------------------

    /// Advance the phase and report the change.
    pub fn advance(&mut self, sink: &mut dyn ReportSink) -> PhaseChange {
        let change = self.phase.advance();
        match change {
            PhaseChange::Advanced { from, to } => {
                info!(contest = %self.id, %from, %to, "Phase advanced");
                sink.report(Report::PhaseAdvanced {
                    topic: self.topic.clone(),
                    from,
                    to,
                });
            }
            PhaseChange::Closed { already_closed } => {
                info!(contest = %self.id, already_closed, "Contest closed");
                sink.report(Report::ContestClosed {
                    topic: self.topic.clone(),
                });
            }
        }
        change
    }

    // -----------------------------------------------------------------------
    // Subscription
    // -----------------------------------------------------------------------

    /// Subscribe a participant and drive its `advance` transition.
    ///
    /// Only the phase decides: any participant may register while the
    /// contest is in `Application`, whatever its standing. A participant
    /// already on this contest's subscriber list is refused so the list
    /// never holds the same participant twice. On refusal nothing is
    /// changed.
    pub fn try_register(&mut self, participant: &mut Participant) -> Result<(), ContestError> {
        let phase = self.phase();
        if phase != ContestPhase::Application {
            return Err(ContestError::RegistrationRefused {
                refusal: RegistrationRefusal::WrongPhase(phase),
            });
        }
        if self.is_subscribed(participant.id()) {
            return Err(ContestError::RegistrationRefused {
                refusal: RegistrationRefusal::AlreadySubscribed,
            });
        }

        self.subscribers.push(participant.id());
        participant.advance();
        debug!(
            contest = %self.id,
            participant = %participant.id(),
            subscribers = self.subscribers.len(),
            "Participant subscribed"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Broadcast
    // -----------------------------------------------------------------------

    /// Deliver the current phase to every subscriber, in registration order.
    ///
    /// Returns the number of subscribers that reacted.
    pub fn broadcast(&self, roster: &mut ParticipantRoster, sink: &mut dyn ReportSink) -> usize {
        let phase = self.phase();
        let mut reacted: usize = 0;
        for &id in &self.subscribers {
            let Some(participant) = roster.get_mut(id) else {
                warn!(contest = %self.id, participant = %id, "Subscriber missing from roster");
                continue;
            };
            if let Some(report) = participant.react(phase) {
                reacted = reacted.saturating_add(1);
                sink.report(report);
            }
        }
        debug!(contest = %self.id, %phase, reacted, "Broadcast delivered");
        reacted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use contest_types::{Artifact, Identity, Standing};

    use super::*;
    use crate::sink::ReportLog;

    fn roster_with(names: &[&str]) -> (ParticipantRoster, Vec<ParticipantId>) {
        let mut roster = ParticipantRoster::new();
        let ids = names
            .iter()
            .map(|name| roster.enroll(Identity::named((*name).to_owned())))
            .collect();
        (roster, ids)
    }

    #[test]
    fn new_contest_is_open_for_applications() {
        let contest = Contest::new("Rivers");
        assert_eq!(contest.phase(), ContestPhase::Application);
        assert_eq!(contest.winning_rating(), 0);
        assert!(contest.subscribers().is_empty());
        assert_eq!(contest.topic(), "Rivers");
    }

    #[test]
    fn registration_appends_and_advances() {
        let (mut roster, ids) = roster_with(&["Ann", "Bob"]);
        let mut contest = Contest::new("Rivers");
        for id in &ids {
            contest.try_register(roster.get_mut(*id).unwrap()).unwrap();
        }
        assert_eq!(contest.subscribers(), ids.as_slice());
        assert!(roster.iter().all(|p| p.standing() == Standing::Registered));
    }

    #[test]
    fn registration_refused_outside_application() {
        let (mut roster, ids) = roster_with(&["Ann"]);
        let id = ids.first().copied().unwrap();
        let mut contest = Contest::new("Rivers");
        contest.advance(&mut ReportLog::new());

        let err = contest.try_register(roster.get_mut(id).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ContestError::RegistrationRefused {
                refusal: RegistrationRefusal::WrongPhase(ContestPhase::Review)
            }
        );
        assert!(contest.subscribers().is_empty());
        assert_eq!(roster.get(id).unwrap().standing(), Standing::Initial);
    }

    #[test]
    fn double_registration_is_refused() {
        let (mut roster, ids) = roster_with(&["Ann"]);
        let id = ids.first().copied().unwrap();
        let mut contest = Contest::new("Rivers");
        contest.try_register(roster.get_mut(id).unwrap()).unwrap();
        let err = contest.try_register(roster.get_mut(id).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ContestError::RegistrationRefused {
                refusal: RegistrationRefusal::AlreadySubscribed
            }
        );
        assert_eq!(contest.subscribers().len(), 1);
        assert_eq!(roster.get(id).unwrap().standing(), Standing::Registered);
    }

    #[test]
    fn phase_alone_gates_registration() {
        let (mut roster, ids) = roster_with(&["Ann", "Bob"]);
        let ann = ids.first().copied().unwrap();
        let bob = ids.get(1).copied().unwrap();
        let mut first = Contest::new("Rivers");
        first.try_register(roster.get_mut(ann).unwrap()).unwrap();
        roster
            .get_mut(ann)
            .unwrap()
            .submit_artifact(Artifact::new("a.jpg"))
            .unwrap();

        // Submitted in the first contest, still welcome in the second.
        let mut second = Contest::new("Mountains");
        second.try_register(roster.get_mut(ann).unwrap()).unwrap();
        assert_eq!(second.subscribers(), &[ann]);
        assert_eq!(roster.get(ann).unwrap().standing(), Standing::Promoted);

        // A failed participant registers too; `advance` returns it to Initial.
        roster.get_mut(bob).unwrap().advance();
        roster.get_mut(bob).unwrap().reject();
        let mut third = Contest::new("Lakes");
        third.try_register(roster.get_mut(bob).unwrap()).unwrap();
        assert_eq!(third.subscribers(), &[bob]);
        assert_eq!(roster.get(bob).unwrap().standing(), Standing::Initial);
    }

    #[test]
    fn advance_reports_each_transition_once() {
        let mut contest = Contest::new("Rivers");
        let mut log = ReportLog::new();
        for _ in 0..5 {
            contest.advance(&mut log);
        }
        assert_eq!(contest.phase(), ContestPhase::Closed);
        assert_eq!(log.len(), 5);
        let closed = log
            .reports()
            .iter()
            .filter(|r| matches!(r, Report::ContestClosed { .. }))
            .count();
        assert_eq!(closed, 2);
    }

    #[test]
    fn broadcast_visits_subscribers_in_order() {
        let (mut roster, ids) = roster_with(&["Ann", "Bob", "Cid"]);
        let mut contest = Contest::new("Rivers");
        for id in &ids {
            contest.try_register(roster.get_mut(*id).unwrap()).unwrap();
        }
        let bob = ids.get(1).copied().unwrap();
        roster
            .get_mut(bob)
            .unwrap()
            .submit_artifact(Artifact::new("bob.jpg"))
            .unwrap();

        let mut log = ReportLog::new();
        contest.advance(&mut log);
        log.clear();
        let reacted = contest.broadcast(&mut roster, &mut log);

        assert_eq!(reacted, 3);
        let names: Vec<&str> = log
            .reports()
            .iter()
            .filter_map(Report::identity)
            .map(|identity| identity.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
        assert!(matches!(
            log.reports().get(1),
            Some(Report::UnderReview { .. })
        ));
    }

    #[test]
    fn broadcast_skips_unknown_subscribers() {
        let mut roster = ParticipantRoster::new();
        let mut stranger = Participant::new(Identity::named("Zed".to_owned()));
        let mut contest = Contest::new("Rivers");
        contest.try_register(&mut stranger).unwrap();
        contest.advance(&mut ReportLog::new());

        let mut log = ReportLog::new();
        assert_eq!(contest.broadcast(&mut roster, &mut log), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn ensure_phase_matches_session() {
        let contest = Contest::new("Rivers");
        assert!(contest.ensure_phase(Session::CloseApplications).is_ok());
        assert_eq!(
            contest.ensure_phase(Session::Voting),
            Err(ContestError::SessionOutOfOrder {
                session: Session::Voting,
                phase: ContestPhase::Application
            })
        );
    }
}

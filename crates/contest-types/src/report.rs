//! Status reports emitted by the contest core.
//!
//! Every state-changing or rejected operation produces exactly one
//! [`Report`]. Its [`Display`](core::fmt::Display) rendering is the
//! human-readable status line and the only output format the core exposes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{ContestPhase, Standing};
use crate::structs::{Artifact, Identity};

/// An orchestrator session, named in out-of-order rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    /// Closing the application window.
    CloseApplications,
    /// Duplicate detection and promotion.
    Review,
    /// Rating collection.
    Voting,
    /// Winner selection.
    Awarding,
}

impl Session {
    /// The phase the contest must be in for this session to run.
    pub const fn expected_phase(self) -> ContestPhase {
        match self {
            Self::CloseApplications => ContestPhase::Application,
            Self::Review => ContestPhase::Review,
            Self::Voting => ContestPhase::Vote,
            Self::Awarding => ContestPhase::Awarding,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CloseApplications => "application close",
            Self::Review => "review",
            Self::Voting => "voting",
            Self::Awarding => "awarding",
        };
        f.write_str(name)
    }
}

/// Why a registration attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationRefusal {
    /// The contest is no longer accepting applications.
    WrongPhase(ContestPhase),
    /// The participant is already subscribed to this contest.
    AlreadySubscribed,
}

impl fmt::Display for RegistrationRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongPhase(phase) => write!(f, "applications are closed ({phase} phase)"),
            Self::AlreadySubscribed => f.write_str("already registered"),
        }
    }
}

/// One status line produced by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Report {
    /// A new contest was created.
    ContestOpened {
        /// Topic of the contest.
        topic: String,
    },
    /// A participant joined the roster.
    Enrolled {
        /// The participant.
        identity: Identity,
    },
    /// A participant registered for a contest.
    Registered {
        /// The participant.
        identity: Identity,
        /// Topic of the contest.
        topic: String,
    },
    /// A registration attempt was refused.
    RegistrationRejected {
        /// The participant.
        identity: Identity,
        /// Topic of the contest.
        topic: String,
        /// Why it was refused.
        reason: RegistrationRefusal,
    },
    /// A participant submitted an artifact.
    ArtifactSubmitted {
        /// The participant.
        identity: Identity,
        /// The submitted artifact.
        artifact: Artifact,
    },
    /// A submission was refused because the participant was not registered.
    SubmissionRejected {
        /// The participant.
        identity: Identity,
        /// Standing at the time of the attempt.
        standing: Standing,
    },
    /// Review began and the participant had no artifact.
    MissingSubmission {
        /// The participant.
        identity: Identity,
    },
    /// Review began and the participant's artifact is pending.
    UnderReview {
        /// The participant.
        identity: Identity,
    },
    /// The participant's artifact passed review.
    AcceptedForVoting {
        /// The participant.
        identity: Identity,
    },
    /// The participant's artifact was flagged as a duplicate.
    FailedReview {
        /// The participant.
        identity: Identity,
    },
    /// A rating input could not be used; the rating falls back to zero.
    RatingFallback {
        /// The participant being rated.
        identity: Identity,
        /// The artifact being rated.
        artifact: Artifact,
        /// The raw input, if any was received.
        raw: Option<String>,
    },
    /// A promoted participant's final rating.
    RatingReported {
        /// The participant.
        identity: Identity,
        /// The recorded rating.
        rating: i32,
    },
    /// A participant won.
    WinnerAnnounced {
        /// The winner.
        identity: Identity,
    },
    /// A participant returned to the initial standing.
    ParticipantReset {
        /// The participant.
        identity: Identity,
    },
    /// No rating above zero was cast; nobody wins.
    NoWinner {
        /// Topic of the contest.
        topic: String,
    },
    /// The contest moved to a new, non-terminal phase.
    PhaseAdvanced {
        /// Topic of the contest.
        topic: String,
        /// The previous phase.
        from: ContestPhase,
        /// The new phase.
        to: ContestPhase,
    },
    /// The contest is closed (emitted on entering and on every later advance).
    ContestClosed {
        /// Topic of the contest.
        topic: String,
    },
    /// A session was invoked while the contest was in the wrong phase.
    SessionOutOfOrder {
        /// Topic of the contest.
        topic: String,
        /// The session that was refused.
        session: Session,
        /// The phase the contest was in.
        phase: ContestPhase,
    },
}

impl Report {
    /// The participant this report is addressed to, if any.
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Enrolled { identity }
            | Self::Registered { identity, .. }
            | Self::RegistrationRejected { identity, .. }
            | Self::ArtifactSubmitted { identity, .. }
            | Self::SubmissionRejected { identity, .. }
            | Self::MissingSubmission { identity }
            | Self::UnderReview { identity }
            | Self::AcceptedForVoting { identity }
            | Self::FailedReview { identity }
            | Self::RatingFallback { identity, .. }
            | Self::RatingReported { identity, .. }
            | Self::WinnerAnnounced { identity }
            | Self::ParticipantReset { identity } => Some(identity),
            Self::ContestOpened { .. }
            | Self::NoWinner { .. }
            | Self::PhaseAdvanced { .. }
            | Self::ContestClosed { .. }
            | Self::SessionOutOfOrder { .. } => None,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContestOpened { topic } => write!(f, "New contest about '{topic}' is opened."),
            Self::Enrolled { identity } => write!(
                f,
                "{}You have been enrolled as a participant.",
                identity.notification_prefix()
            ),
            Self::Registered { identity, topic } => write!(
                f,
                "Participant {} successfully registered for '{topic}'.",
                identity.name
            ),
            Self::RegistrationRejected {
                identity,
                topic,
                reason,
            } => write!(
                f,
                "Participant {} cannot register for '{topic}': {reason}.",
                identity.name
            ),
            Self::ArtifactSubmitted { identity, artifact } => write!(
                f,
                "{}You successfully submitted '{artifact}'.",
                identity.notification_prefix()
            ),
            Self::SubmissionRejected { identity, standing } => write!(
                f,
                "{}You can't submit an artifact while {standing}.",
                identity.notification_prefix()
            ),
            Self::MissingSubmission { identity } => write!(
                f,
                "{}You didn't submit an artifact. You failed the contest.",
                identity.notification_prefix()
            ),
            Self::UnderReview { identity } => write!(
                f,
                "{}Your submission is on review.",
                identity.notification_prefix()
            ),
            Self::AcceptedForVoting { identity } => write!(
                f,
                "{}Your submission was accepted for voting.",
                identity.notification_prefix()
            ),
            Self::FailedReview { identity } => write!(
                f,
                "{}You didn't pass the review session.",
                identity.notification_prefix()
            ),
            Self::RatingFallback { artifact, raw, .. } => match raw {
                Some(raw) => write!(
                    f,
                    "Accepted only integers, got '{raw}'. Rating for '{artifact}' is 0."
                ),
                None => write!(f, "No rating received. Rating for '{artifact}' is 0."),
            },
            Self::RatingReported { identity, rating } => write!(
                f,
                "{}Your rating is {rating}.",
                identity.notification_prefix()
            ),
            Self::WinnerAnnounced { identity } => write!(f, "{} is the winner!", identity.name),
            Self::ParticipantReset { identity } => write!(
                f,
                "{}You are free to enter the next contest.",
                identity.notification_prefix()
            ),
            Self::NoWinner { topic } => {
                write!(f, "No ratings were cast for '{topic}'. There is no winner.")
            }
            Self::PhaseAdvanced { topic, from, to } => match to {
                ContestPhase::Review => {
                    write!(f, "Application session for contest '{topic}' is closed.")
                }
                ContestPhase::Vote => write!(f, "Review of '{topic}' is finished. Voting is open."),
                ContestPhase::Awarding => {
                    write!(f, "Voting for '{topic}' is finished. Awarding begins.")
                }
                ContestPhase::Application | ContestPhase::Closed => {
                    write!(f, "Contest '{topic}' moved from {from} to {to}.")
                }
            },
            Self::ContestClosed { topic } => write!(f, "Contest '{topic}' is closed."),
            Self::SessionOutOfOrder {
                topic,
                session,
                phase,
            } => write!(
                f,
                "Cannot run the {session} session for '{topic}' during the {phase} phase."
            ),
        }
    }
}

//! Enumeration types for the contest simulation.
//!
//! The two state sets that drive everything else: the phase of a contest
//! and the standing of a participant.

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Contest phases
// ---------------------------------------------------------------------------

/// The stage a contest is currently in.
///
/// Phases form a single forward chain ending at [`ContestPhase::Closed`].
/// The derived ordering follows the chain, so `Application < Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContestPhase {
    /// Participants may register and submit artifacts.
    Application,
    /// Submissions are checked for duplicates.
    Review,
    /// Eligible submissions are rated.
    Vote,
    /// Winners are determined and announced.
    Awarding,
    /// The contest is over. Terminal.
    Closed,
}

impl ContestPhase {
    /// Every phase, in chain order.
    pub const ALL: [Self; 5] = [
        Self::Application,
        Self::Review,
        Self::Vote,
        Self::Awarding,
        Self::Closed,
    ];

    /// The phase that follows this one, or `None` for [`ContestPhase::Closed`].
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Application => Some(Self::Review),
            Self::Review => Some(Self::Vote),
            Self::Vote => Some(Self::Awarding),
            Self::Awarding => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    /// Whether this is the terminal phase.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Application => "application",
            Self::Review => "review",
            Self::Vote => "vote",
            Self::Awarding => "awarding",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Participant standing
// ---------------------------------------------------------------------------

/// A participant's position in its lifecycle.
///
/// The lifecycle is a cycle: winners and failed participants return to
/// [`Standing::Initial`] and may register for another contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Standing {
    /// Not taking part in any contest.
    Initial,
    /// Registered for a contest, no artifact yet.
    Registered,
    /// Artifact submitted, awaiting review.
    Submitted,
    /// Passed review and admitted to the vote.
    Promoted,
    /// Won the contest.
    Winner,
    /// Dropped out of the contest at some stage.
    Failed,
}

impl Standing {
    /// Every standing.
    pub const ALL: [Self; 6] = [
        Self::Initial,
        Self::Registered,
        Self::Submitted,
        Self::Promoted,
        Self::Winner,
        Self::Failed,
    ];
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "initial",
            Self::Registered => "registered",
            Self::Submitted => "submitted",
            Self::Promoted => "promoted",
            Self::Winner => "winner",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

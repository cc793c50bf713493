//! Error types for the contest-participants crate.
//!
//! Illegal participant actions are typed errors rather than panics. The
//! contest core turns them into status reports at the point they occur.

use contest_types::{ParticipantId, Standing};

/// Errors that can occur during participant operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantError {
    /// An artifact may only be submitted while registered.
    #[error("cannot submit an artifact while {standing}")]
    SubmissionNotAllowed {
        /// Standing at the time of the attempt.
        standing: Standing,
    },

    /// A rating may only be recorded for a promoted participant.
    #[error("cannot record a rating while {standing}")]
    RatingNotAllowed {
        /// Standing at the time of the attempt.
        standing: Standing,
    },

    /// No participant with the given ID is enrolled.
    #[error("participant not found: {0}")]
    NotFound(ParticipantId),
}

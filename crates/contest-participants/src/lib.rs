//! Participant lifecycle, roster, and contact validation for the contest
//! simulation.
//!
//! This crate holds everything that operates on a single participant
//! without knowing about contests as a whole. The contest core drives it
//! through phase broadcasts and session algorithms.
//!
//! # Modules
//!
//! - [`contact`] -- Email and phone validation, identity construction
//! - [`error`] -- Error types for participant operations ([`ParticipantError`])
//! - [`lifecycle`] -- The standing transition table
//! - [`participant`] -- Participant data and per-phase reaction ([`Participant`])
//! - [`roster`] -- Ownership of all participants ([`ParticipantRoster`])

pub mod contact;
pub mod error;
pub mod lifecycle;
pub mod participant;
pub mod roster;

// Re-export primary types at crate root for convenience.
pub use contact::{ContactError, identity, identity_from_contact};
pub use error::ParticipantError;
pub use lifecycle::Transition;
pub use participant::Participant;
pub use roster::ParticipantRoster;

//! Shared type definitions for the contest simulation.
//!
//! This crate is the single source of truth for the data that flows between
//! the participant lifecycle, the contest core, and the engine binary.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for contests and participants
//! - [`enums`] -- Contest phases and participant standings
//! - [`structs`] -- Identity records and opaque artifact identifiers
//! - [`report`] -- Status reports emitted for every transition or rejection

pub mod enums;
pub mod ids;
pub mod report;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ContestPhase, Standing};
pub use ids::{ContestId, ParticipantId};
pub use report::{RegistrationRefusal, Report, Session};
pub use structs::{Artifact, Identity};

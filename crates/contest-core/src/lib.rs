//! Phase machine, broadcast, and orchestration for the contest simulation.
//!
//! A contest moves through `Application -> Review -> Vote -> Awarding ->
//! Closed`. Every phase change is broadcast to the subscribed participants,
//! which react by advancing, failing, or reporting. Four orchestrator
//! sessions drive the whole thing.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `contest-config.yaml` into
//!   strongly-typed structs.
//! - [`contest`] -- The contest aggregate: phase, subscribers, broadcast.
//! - [`duplicate`] -- Duplicate-submission detection.
//! - [`phase`] -- The forward-only phase machine.
//! - [`rating`] -- [`RatingSource`] trait, [`ScriptedRatings`] and
//!   [`LineRatings`].
//! - [`registration`] -- Registration and artifact submission with reporting.
//! - [`runner`] -- Full contest run with a per-session callback.
//! - [`session`] -- The four orchestrator sessions.
//! - [`sink`] -- [`ReportSink`] trait, [`TracingSink`] and [`ReportLog`].

pub mod config;
pub mod contest;
pub mod duplicate;
pub mod phase;
pub mod rating;
pub mod registration;
pub mod runner;
pub mod session;
pub mod sink;

pub use contest::{Contest, ContestError};
pub use phase::{PhaseChange, PhaseMachine};
pub use rating::{LineRatings, RatingError, RatingSource, ScriptedRatings};
pub use runner::{ContestSummary, NoOpCallback, SessionCallback, run_contest};
pub use sink::{ReportLog, ReportSink, TracingSink};

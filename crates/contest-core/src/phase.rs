//! Contest phase machine.
//!
//! The phase machine is the single source of truth for where a contest is
//! in its life. Phases only move forward along
//! `Application -> Review -> Vote -> Awarding -> Closed`, one step per
//! [`advance`](PhaseMachine::advance), and never leave `Closed`.

use contest_types::ContestPhase;

/// Outcome of one [`PhaseMachine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    /// Moved to a new, non-terminal phase.
    Advanced {
        /// The phase before the call.
        from: ContestPhase,
        /// The phase after the call.
        to: ContestPhase,
    },
    /// The contest is closed. Emitted on entering `Closed` and again on
    /// every later advance.
    Closed {
        /// Whether the machine was already closed before the call.
        already_closed: bool,
    },
}

/// Forward-only phase state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMachine {
    /// Current phase.
    phase: ContestPhase,
}

impl PhaseMachine {
    /// Create a machine in the [`ContestPhase::Application`] phase.
    pub const fn new() -> Self {
        Self {
            phase: ContestPhase::Application,
        }
    }

    /// Create a machine at an explicit phase (useful for testing).
    pub const fn at(phase: ContestPhase) -> Self {
        Self { phase }
    }

    /// Current phase.
    pub const fn phase(&self) -> ContestPhase {
        self.phase
    }

    /// Whether the terminal phase has been reached.
    pub const fn is_closed(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Move to the next phase.
    ///
    /// On `Closed` this is a no-op that reports the closed signal again.
    pub const fn advance(&mut self) -> PhaseChange {
        let from = self.phase;
        match from.next() {
            Some(ContestPhase::Closed) => {
                self.phase = ContestPhase::Closed;
                PhaseChange::Closed {
                    already_closed: false,
                }
            }
            Some(to) => {
                self.phase = to;
                PhaseChange::Advanced { from, to }
            }
            None => PhaseChange::Closed {
                already_closed: true,
            },
        }
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

//! Participant lifecycle state machine.
//!
//! Every [`Standing`] supports two operations, `advance` and `reject`.
//! The full table:
//!
//! | Standing     | advance      | reject            |
//! |--------------|--------------|-------------------|
//! | `Initial`    | `Registered` | `Initial` (no-op) |
//! | `Registered` | `Submitted`  | `Failed`          |
//! | `Submitted`  | `Promoted`   | `Failed`          |
//! | `Promoted`   | `Winner`     | `Failed`          |
//! | `Winner`     | `Initial`    | `Winner` (no-op)  |
//! | `Failed`     | `Initial`    | `Failed` (no-op)  |
//!
//! Failing always routes through `Failed`, and only an explicit `advance`
//! from `Failed` returns a participant to `Initial`.

use contest_types::Standing;

/// One of the two operations every standing supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Move forward (or back to `Initial` from a finished cycle).
    Advance,
    /// Drop out of the current cycle.
    Reject,
}

/// The standing reached by `advance` from `standing`.
pub const fn advanced(standing: Standing) -> Standing {
    match standing {
        Standing::Initial => Standing::Registered,
        Standing::Registered => Standing::Submitted,
        Standing::Submitted => Standing::Promoted,
        Standing::Promoted => Standing::Winner,
        Standing::Winner | Standing::Failed => Standing::Initial,
    }
}

/// The standing reached by `reject` from `standing`.
pub const fn rejected(standing: Standing) -> Standing {
    match standing {
        Standing::Registered | Standing::Submitted | Standing::Promoted => Standing::Failed,
        Standing::Initial | Standing::Winner | Standing::Failed => standing,
    }
}

/// Apply a transition to a standing.
pub const fn apply(standing: Standing, transition: Transition) -> Standing {
    match transition {
        Transition::Advance => advanced(standing),
        Transition::Reject => rejected(standing),
    }
}

//! Session callback that lets late entrants try their luck.
//!
//! Once applications close, every late entrant attempts to register and
//! submit. The contest refuses both and the refusals are reported like
//! any other status line.

use contest_core::{Contest, ReportSink, SessionCallback};
use contest_participants::ParticipantRoster;
use contest_types::Session;
use tracing::debug;

use crate::enrollment::{self, Entrant};

/// Callback that registers late entrants after the application session.
#[derive(Debug, Default)]
pub struct LateEntryCallback {
    late: Vec<Entrant>,
    accepted: usize,
}

impl LateEntryCallback {
    /// Create a callback for the given entrants.
    pub const fn new(late: Vec<Entrant>) -> Self {
        Self { late, accepted: 0 }
    }

    /// Late entrants the contest accepted anyway.
    pub const fn accepted(&self) -> usize {
        self.accepted
    }
}

impl SessionCallback for LateEntryCallback {
    fn on_session(
        &mut self,
        session: Session,
        contest: &mut Contest,
        roster: &mut ParticipantRoster,
        sink: &mut dyn ReportSink,
    ) {
        if session != Session::CloseApplications || self.late.is_empty() {
            return;
        }
        let late = std::mem::take(&mut self.late);
        debug!(entrants = late.len(), "Late entrants trying to register");
        self.accepted = enrollment::register_entrants(contest, roster, &late, sink);
    }
}

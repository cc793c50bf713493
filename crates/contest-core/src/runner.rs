//! Full contest run.
//!
//! [`run_contest`] drives an open contest through all four sessions in
//! order and returns a [`ContestSummary`]. Registration happens before the
//! run; a [`SessionCallback`] gets control after every session so callers
//! can act between them (for example, late entrants trying to register
//! after applications closed).

use contest_participants::ParticipantRoster;
use contest_types::{ContestId, ContestPhase, Report, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contest::Contest;
use crate::rating::RatingSource;
use crate::session;
use crate::sink::ReportSink;

/// Outcome of a full contest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestSummary {
    /// The contest that ran.
    pub contest_id: ContestId,
    /// Its topic.
    pub topic: String,
    /// Phase at the end of the run.
    pub final_phase: ContestPhase,
    /// Highest rating cast.
    pub winning_rating: i32,
    /// Names of the winners, in announcement order.
    pub winners: Vec<String>,
    /// Names of participants that never submitted an artifact.
    pub missing_submissions: Vec<String>,
    /// Names of participants whose artifact was a duplicate.
    pub disqualified: Vec<String>,
    /// Sessions that ran, in order.
    pub sessions: Vec<Session>,
    /// Total status reports emitted during the run.
    pub reports: usize,
}

/// Callback invoked after each session completes.
pub trait SessionCallback {
    /// Called after `session` ran (whether or not it was accepted).
    fn on_session(
        &mut self,
        session: Session,
        contest: &mut Contest,
        roster: &mut ParticipantRoster,
        sink: &mut dyn ReportSink,
    );
}

/// A callback that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl SessionCallback for NoOpCallback {
    fn on_session(
        &mut self,
        _session: Session,
        _contest: &mut Contest,
        _roster: &mut ParticipantRoster,
        _sink: &mut dyn ReportSink,
    ) {
    }
}

/// Forwards reports while collecting what the summary needs.
struct Tally<'a> {
    inner: &'a mut dyn ReportSink,
    reports: usize,
    winners: Vec<String>,
    missing_submissions: Vec<String>,
    disqualified: Vec<String>,
}

impl<'a> Tally<'a> {
    fn new(inner: &'a mut dyn ReportSink) -> Self {
        Self {
            inner,
            reports: 0,
            winners: Vec::new(),
            missing_submissions: Vec::new(),
            disqualified: Vec::new(),
        }
    }
}

impl ReportSink for Tally<'_> {
    fn report(&mut self, report: Report) {
        self.reports = self.reports.saturating_add(1);
        match &report {
            Report::WinnerAnnounced { identity } => self.winners.push(identity.name.clone()),
            Report::MissingSubmission { identity } => {
                self.missing_submissions.push(identity.name.clone());
            }
            Report::FailedReview { identity } => self.disqualified.push(identity.name.clone()),
            _ => {}
        }
        self.inner.report(report);
    }
}

/// Run every session on an open contest.
///
/// Sessions refused because the contest was not in the expected phase are
/// reported by the session itself and the run carries on; the summary
/// lists only the sessions that ran.
pub fn run_contest(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    ratings: &mut dyn RatingSource,
    callback: &mut dyn SessionCallback,
    sink: &mut dyn ReportSink,
) -> ContestSummary {
    let mut tally = Tally::new(sink);
    let mut sessions = Vec::new();

    info!(
        contest = %contest.id(),
        topic = contest.topic(),
        subscribers = contest.subscribers().len(),
        "Contest run starting"
    );

    let order = [
        Session::CloseApplications,
        Session::Review,
        Session::Voting,
        Session::Awarding,
    ];
    for next in order {
        let ran = match next {
            Session::CloseApplications => {
                session::close_application_session(contest, roster, &mut tally)
            }
            Session::Review => session::review_session(contest, roster, &mut tally),
            Session::Voting => session::voting_session(contest, roster, ratings, &mut tally),
            Session::Awarding => session::choose_winner(contest, roster, &mut tally),
        };
        if ran {
            sessions.push(next);
        }
        callback.on_session(next, contest, roster, &mut tally);
    }

    let summary = ContestSummary {
        contest_id: contest.id(),
        topic: contest.topic().to_owned(),
        final_phase: contest.phase(),
        winning_rating: contest.winning_rating(),
        winners: tally.winners,
        missing_submissions: tally.missing_submissions,
        disqualified: tally.disqualified,
        sessions,
        reports: tally.reports,
    };
    info!(
        contest = %summary.contest_id,
        final_phase = %summary.final_phase,
        winning_rating = summary.winning_rating,
        winners = summary.winners.len(),
        "Contest run finished"
    );
    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use contest_types::{Artifact, Identity};

    use super::*;
    use crate::rating::ScriptedRatings;
    use crate::registration;
    use crate::sink::ReportLog;

    struct LateEntrant {
        name: &'static str,
        accepted: Option<bool>,
    }

    impl SessionCallback for LateEntrant {
        fn on_session(
            &mut self,
            session: Session,
            contest: &mut Contest,
            roster: &mut ParticipantRoster,
            sink: &mut dyn ReportSink,
        ) {
            if session == Session::CloseApplications {
                let id = roster.enroll(Identity::named(self.name.to_owned()));
                let participant = roster.get_mut(id).unwrap();
                self.accepted = Some(registration::register(contest, participant, sink));
            }
        }
    }

    #[test]
    fn full_run_produces_summary() {
        let mut log = ReportLog::new();
        let mut roster = ParticipantRoster::new();
        let mut contest = session::create_contest("Rivers", &mut log);
        for (name, artifact) in [("Ann", Some("a")), ("Bob", Some("a")), ("Cid", Some("c")), ("Dee", None)] {
            let id = roster.enroll(Identity::named(name.to_owned()));
            let p = roster.get_mut(id).unwrap();
            registration::register(&mut contest, p, &mut log);
            if let Some(artifact) = artifact {
                registration::submit_artifact(p, Artifact::new(artifact), &mut log);
            }
        }
        let before = log.len();

        let mut ratings = ScriptedRatings::new(["4"]);
        let summary = run_contest(
            &mut contest,
            &mut roster,
            &mut ratings,
            &mut NoOpCallback,
            &mut log,
        );

        assert_eq!(summary.final_phase, ContestPhase::Closed);
        assert_eq!(summary.winning_rating, 4);
        assert_eq!(summary.winners, vec!["Cid".to_owned()]);
        assert_eq!(summary.missing_submissions, vec!["Dee".to_owned()]);
        assert_eq!(summary.disqualified, vec!["Ann".to_owned(), "Bob".to_owned()]);
        assert_eq!(summary.sessions.len(), 4);
        assert_eq!(summary.reports, log.len().saturating_sub(before));
    }

    #[test]
    fn callback_runs_between_sessions() {
        let mut log = ReportLog::new();
        let mut roster = ParticipantRoster::new();
        let mut contest = session::create_contest("Rivers", &mut log);
        let mut late = LateEntrant {
            name: "Eve",
            accepted: None,
        };
        let summary = run_contest(
            &mut contest,
            &mut roster,
            &mut ScriptedRatings::default(),
            &mut late,
            &mut log,
        );
        assert_eq!(late.accepted, Some(false));
        assert!(summary.winners.is_empty());
        assert!(contest.subscribers().is_empty());
    }

    #[test]
    fn rerun_on_closed_contest_runs_no_session() {
        let mut log = ReportLog::new();
        let mut roster = ParticipantRoster::new();
        let mut contest = session::create_contest("Rivers", &mut log);
        run_contest(
            &mut contest,
            &mut roster,
            &mut ScriptedRatings::default(),
            &mut NoOpCallback,
            &mut log,
        );
        let summary = run_contest(
            &mut contest,
            &mut roster,
            &mut ScriptedRatings::default(),
            &mut NoOpCallback,
            &mut log,
        );
        assert!(summary.sessions.is_empty());
        assert_eq!(summary.reports, 4);
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut log = ReportLog::new();
        let mut roster = ParticipantRoster::new();
        let mut contest = session::create_contest("Rivers", &mut log);
        let summary = run_contest(
            &mut contest,
            &mut roster,
            &mut ScriptedRatings::default(),
            &mut NoOpCallback,
            &mut log,
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["topic"], "Rivers");
        assert_eq!(json["final_phase"], "Closed");
    }
}

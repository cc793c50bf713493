//! Orchestrator sessions.
//!
//! The organizing authority drives a contest through four sessions, each a
//! unit of work that may run a bulk algorithm, advance the phase, and
//! broadcast, in that order:
//!
//! 1. **Close applications** -- `Application -> Review`, then broadcast.
//!    Participants without an artifact fail.
//! 2. **Review** -- duplicate detection over `Submitted` subscribers, then
//!    `Review -> Vote` and broadcast. Eligible participants are promoted,
//!    copies fail.
//! 3. **Voting** -- collect a rating for every `Promoted` subscriber and
//!    record the maximum as the winning rating, then `Vote -> Awarding` and
//!    broadcast.
//! 4. **Awarding** -- promote the participants holding the winning rating
//!    and fail the rest, broadcast, then `Awarding -> Closed`.
//!
//! Sessions hold no state of their own. The contest, the roster, and the
//! collaborators are passed in explicitly. A session invoked in the wrong
//! phase is a reported no-op and returns `false`.

use contest_participants::ParticipantRoster;
use contest_types::{Report, Session, Standing};
use tracing::{debug, info, warn};

use crate::contest::{Contest, ContestError};
use crate::duplicate;
use crate::rating::{self, RatingSource};
use crate::sink::ReportSink;

/// Create a contest and announce it.
pub fn create_contest(topic: impl Into<String>, sink: &mut dyn ReportSink) -> Contest {
    let contest = Contest::new(topic);
    info!(contest = %contest.id(), topic = contest.topic(), "Contest created");
    sink.report(Report::ContestOpened {
        topic: contest.topic().to_owned(),
    });
    contest
}

/// Refuse the session with a report unless the contest is in its phase.
fn begin(contest: &Contest, session: Session, sink: &mut dyn ReportSink) -> bool {
    match contest.ensure_phase(session) {
        Ok(()) => {
            info!(contest = %contest.id(), %session, "Session started");
            true
        }
        Err(err) => {
            warn!(contest = %contest.id(), %err, "Session refused");
            if let ContestError::SessionOutOfOrder { session, phase } = err {
                sink.report(Report::SessionOutOfOrder {
                    topic: contest.topic().to_owned(),
                    session,
                    phase,
                });
            }
            false
        }
    }
}

/// Close the application window.
pub fn close_application_session(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    sink: &mut dyn ReportSink,
) -> bool {
    if !begin(contest, Session::CloseApplications, sink) {
        return false;
    }
    contest.advance(sink);
    contest.broadcast(roster, sink);
    true
}

/// Run duplicate detection, then open the vote.
pub fn review_session(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    sink: &mut dyn ReportSink,
) -> bool {
    if !begin(contest, Session::Review, sink) {
        return false;
    }
    duplicate::detect_duplicates(contest.subscribers(), roster);
    contest.advance(sink);
    contest.broadcast(roster, sink);
    true
}

/// Collect ratings for promoted participants, then open the awarding.
///
/// The winning rating is reset to 0 at the start of every voting session
/// and only ever raised by a strictly greater rating, so negative ratings
/// never win.
pub fn voting_session(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    ratings: &mut dyn RatingSource,
    sink: &mut dyn ReportSink,
) -> bool {
    if !begin(contest, Session::Voting, sink) {
        return false;
    }
    let mut winning: i32 = 0;
    for &id in contest.subscribers() {
        let Some(participant) = roster.get_mut(id) else {
            warn!(contest = %contest.id(), participant = %id, "Subscriber missing from roster");
            continue;
        };
        if participant.standing() != Standing::Promoted {
            continue;
        }
        let Some(artifact) = participant.artifact().cloned() else {
            warn!(participant = %id, "Promoted participant has no artifact");
            continue;
        };
        let rating = rating::collect_rating(ratings, participant.identity(), &artifact, sink);
        if let Err(err) = participant.record_rating(rating) {
            warn!(participant = %id, %err, "Rating not recorded");
            continue;
        }
        if rating > winning {
            winning = rating;
        }
    }
    contest.set_winning_rating(winning);
    info!(contest = %contest.id(), winning_rating = winning, "Voting finished");
    contest.advance(sink);
    contest.broadcast(roster, sink);
    true
}

/// Decide the winners and close the contest.
///
/// With a winning rating of 0 nobody voted for anything: a "no winner"
/// report is emitted and no participant changes standing. The awarding
/// broadcast and the final advance still happen so the contest closes.
pub fn choose_winner(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    sink: &mut dyn ReportSink,
) -> bool {
    if !begin(contest, Session::Awarding, sink) {
        return false;
    }
    let winning = contest.winning_rating();
    if winning == 0 {
        info!(contest = %contest.id(), "No winner");
        sink.report(Report::NoWinner {
            topic: contest.topic().to_owned(),
        });
    } else {
        for &id in contest.subscribers() {
            let Some(participant) = roster.get_mut(id) else {
                continue;
            };
            if participant.standing() != Standing::Promoted {
                continue;
            }
            let standing = if participant.rating() == winning {
                participant.advance()
            } else {
                participant.reject()
            };
            debug!(participant = %id, rating = participant.rating(), %standing, "Award decided");
        }
    }
    contest.broadcast(roster, sink);
    contest.advance(sink);
    true
}

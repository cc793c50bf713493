//! Registration and submission, with reporting.
//!
//! Both operations are reported no-ops when they are not allowed: the
//! refusal becomes a status line and the caller gets `false`. Nothing is
//! propagated further.

use contest_participants::{Participant, ParticipantError};
use contest_types::{Artifact, Report};
use tracing::debug;

use crate::contest::{Contest, ContestError};
use crate::sink::ReportSink;

/// Register `participant` for `contest`.
///
/// Succeeds only while the contest is in `Application`. Returns whether
/// the participant was registered.
pub fn register(
    contest: &mut Contest,
    participant: &mut Participant,
    sink: &mut dyn ReportSink,
) -> bool {
    match contest.try_register(participant) {
        Ok(()) => {
            sink.report(Report::Registered {
                identity: participant.identity().clone(),
                topic: contest.topic().to_owned(),
            });
            true
        }
        Err(ContestError::RegistrationRefused { refusal }) => {
            debug!(participant = %participant.id(), %refusal, "Registration refused");
            sink.report(Report::RegistrationRejected {
                identity: participant.identity().clone(),
                topic: contest.topic().to_owned(),
                reason: refusal,
            });
            false
        }
        Err(err @ ContestError::SessionOutOfOrder { .. }) => {
            debug!(participant = %participant.id(), %err, "Registration refused");
            false
        }
    }
}

/// Submit an artifact for `participant`.
///
/// Succeeds only while the participant is `Registered`. Returns whether the
/// artifact was accepted.
pub fn submit_artifact(
    participant: &mut Participant,
    artifact: Artifact,
    sink: &mut dyn ReportSink,
) -> bool {
    match participant.submit_artifact(artifact.clone()) {
        Ok(()) => {
            sink.report(Report::ArtifactSubmitted {
                identity: participant.identity().clone(),
                artifact,
            });
            true
        }
        Err(ParticipantError::SubmissionNotAllowed { standing }) => {
            debug!(participant = %participant.id(), %standing, "Submission refused");
            sink.report(Report::SubmissionRejected {
                identity: participant.identity().clone(),
                standing,
            });
            false
        }
        Err(err) => {
            debug!(participant = %participant.id(), %err, "Submission refused");
            false
        }
    }
}

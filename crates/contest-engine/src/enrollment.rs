//! Roster enrollment from the configured participant list.
//!
//! Each entry's contact details are validated before the participant is
//! enrolled. An entry with invalid contacts is skipped with a warning; the
//! rest of the roster is unaffected.

use contest_core::config::ParticipantEntry;
use contest_core::registration;
use contest_core::{Contest, ReportSink};
use contest_participants::{ContactError, ParticipantRoster, identity, identity_from_contact};
use contest_types::{Artifact, Identity, ParticipantId, Report};
use tracing::{info, warn};

/// A participant enrolled from the config, with what it plans to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    /// Roster identifier.
    pub id: ParticipantId,
    /// Artifact to submit after registering.
    pub artifact: Option<Artifact>,
}

/// Result of enrolling the configured participants.
#[derive(Debug, Default)]
pub struct Enrollment {
    /// Every enrolled participant.
    pub roster: ParticipantRoster,
    /// Participants that register while applications are open.
    pub on_time: Vec<Entrant>,
    /// Participants that try to register after applications closed.
    pub late: Vec<Entrant>,
    /// Names of entries skipped because of invalid contacts.
    pub skipped: Vec<String>,
}

/// Build a validated identity for one entry.
///
/// Explicit `email`/`phone` fields win over the free-form `contact`.
fn resolve_identity(entry: &ParticipantEntry) -> Result<Identity, ContactError> {
    match (&entry.email, &entry.phone, &entry.contact) {
        (None, None, Some(contact)) => identity_from_contact(&entry.name, contact),
        (email, phone, _) => identity(&entry.name, email.as_deref(), phone.as_deref()),
    }
}

/// Enroll every valid entry, reporting each enrollment.
pub fn enroll_participants(
    entries: &[ParticipantEntry],
    sink: &mut dyn ReportSink,
) -> Enrollment {
    let mut enrollment = Enrollment::default();
    for entry in entries {
        let identity = match resolve_identity(entry) {
            Ok(identity) => identity,
            Err(err) => {
                warn!(name = %entry.name, %err, "Invalid contact details, entry skipped");
                enrollment.skipped.push(entry.name.clone());
                continue;
            }
        };
        let id = enrollment.roster.enroll(identity.clone());
        sink.report(Report::Enrolled { identity });

        let entrant = Entrant {
            id,
            artifact: entry.artifact.as_deref().map(Artifact::new),
        };
        if !entry.register {
            continue;
        }
        if entry.late {
            enrollment.late.push(entrant);
        } else {
            enrollment.on_time.push(entrant);
        }
    }
    info!(
        enrolled = enrollment.roster.len(),
        on_time = enrollment.on_time.len(),
        late = enrollment.late.len(),
        skipped = enrollment.skipped.len(),
        "Participants enrolled"
    );
    enrollment
}

/// Register `entrants` for `contest` and submit their artifacts.
///
/// Returns the number of participants that were registered.
pub fn register_entrants(
    contest: &mut Contest,
    roster: &mut ParticipantRoster,
    entrants: &[Entrant],
    sink: &mut dyn ReportSink,
) -> usize {
    let mut registered: usize = 0;
    for entrant in entrants {
        let Some(participant) = roster.get_mut(entrant.id) else {
            warn!(participant = %entrant.id, "Entrant missing from roster");
            continue;
        };
        if registration::register(contest, participant, sink) {
            registered = registered.saturating_add(1);
        }
        if let Some(artifact) = &entrant.artifact {
            registration::submit_artifact(participant, artifact.clone(), sink);
        }
    }
    registered
}

//! Duplicate-submission detection.
//!
//! Pairwise scan over a contest's subscribers. For every `Submitted`
//! participant `p`, every other subscriber `q` that is `Submitted` or
//! `Promoted` is compared; on the first equal artifact identifier both
//! `p` and `q` lose eligibility and the scan for `p` stops.
//!
//! Only the identifiers are compared. Two different submissions that share
//! an identifier count as copies.

use std::collections::BTreeSet;

use contest_participants::ParticipantRoster;
use contest_types::{Artifact, ParticipantId, Standing};
use tracing::{debug, info};

/// Standings whose artifacts take part in the comparison as `q`.
const fn is_comparable(standing: Standing) -> bool {
    matches!(standing, Standing::Submitted | Standing::Promoted)
}

/// Clear eligibility for every subscriber whose artifact is shared with
/// another subscriber.
///
/// Returns the number of participants that lost eligibility in this pass.
pub fn detect_duplicates(subscribers: &[ParticipantId], roster: &mut ParticipantRoster) -> usize {
    // Standings and artifacts do not change during the pass, only the
    // eligibility flags, so the comparison runs over a snapshot.
    let entries: Vec<(ParticipantId, Standing, Option<Artifact>)> = subscribers
        .iter()
        .filter_map(|&id| {
            roster
                .get(id)
                .map(|p| (id, p.standing(), p.artifact().cloned()))
        })
        .collect();

    let mut flagged: BTreeSet<ParticipantId> = BTreeSet::new();
    for (p_id, p_standing, p_artifact) in &entries {
        if *p_standing != Standing::Submitted {
            continue;
        }
        let Some(p_artifact) = p_artifact else {
            continue;
        };
        let copy = entries.iter().find(|(q_id, q_standing, q_artifact)| {
            q_id != p_id && is_comparable(*q_standing) && q_artifact.as_ref() == Some(p_artifact)
        });
        if let Some((q_id, _, _)) = copy {
            debug!(participant = %p_id, copy_of = %q_id, artifact = %p_artifact, "Duplicate artifact");
            flagged.insert(*p_id);
            flagged.insert(*q_id);
        }
    }

    let mut disqualified: usize = 0;
    for id in &flagged {
        if let Some(participant) = roster.get_mut(*id) {
            if participant.is_eligible() {
                disqualified = disqualified.saturating_add(1);
            }
            participant.disqualify();
        }
    }
    info!(
        subscribers = subscribers.len(),
        disqualified, "Duplicate detection finished"
    );
    disqualified
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use contest_types::Identity;
    use proptest::prelude::*;

    use super::*;

    /// Enroll participants, register them, and submit the given artifacts.
    fn submitted(artifacts: &[&str]) -> (ParticipantRoster, Vec<ParticipantId>) {
        let mut roster = ParticipantRoster::new();
        let mut ids = Vec::new();
        for (n, artifact) in artifacts.iter().enumerate() {
            let id = roster.enroll(Identity::named(format!("p{n}")));
            let p = roster.get_mut(id).unwrap();
            p.advance();
            p.submit_artifact(Artifact::new(*artifact)).unwrap();
            ids.push(id);
        }
        (roster, ids)
    }

    fn eligibility(roster: &ParticipantRoster, ids: &[ParticipantId]) -> Vec<bool> {
        ids.iter()
            .map(|id| roster.get(*id).unwrap().is_eligible())
            .collect()
    }

    #[test]
    fn shared_artifact_disqualifies_both() {
        let (mut roster, ids) = submitted(&["x", "x"]);
        assert_eq!(detect_duplicates(&ids, &mut roster), 2);
        assert_eq!(eligibility(&roster, &ids), vec![false, false]);
    }

    #[test]
    fn unique_artifacts_stay_eligible() {
        let (mut roster, ids) = submitted(&["a", "b", "c"]);
        assert_eq!(detect_duplicates(&ids, &mut roster), 0);
        assert_eq!(eligibility(&roster, &ids), vec![true, true, true]);
    }

    #[test]
    fn mixed_roster_flags_only_copies() {
        let (mut roster, ids) = submitted(&["a", "x", "b", "x", "x"]);
        assert_eq!(detect_duplicates(&ids, &mut roster), 3);
        assert_eq!(
            eligibility(&roster, &ids),
            vec![true, false, true, false, false]
        );
    }

    #[test]
    fn promoted_participant_counts_as_copy_source() {
        let (mut roster, ids) = submitted(&["x", "x"]);
        let first = ids.first().copied().unwrap();
        roster.get_mut(first).unwrap().advance(); // Promoted
        assert_eq!(detect_duplicates(&ids, &mut roster), 2);
        assert_eq!(eligibility(&roster, &ids), vec![false, false]);
    }

    #[test]
    fn failed_participant_is_ignored() {
        let (mut roster, ids) = submitted(&["x", "x"]);
        let first = ids.first().copied().unwrap();
        roster.get_mut(first).unwrap().reject(); // Failed
        assert_eq!(detect_duplicates(&ids, &mut roster), 0);
        assert_eq!(eligibility(&roster, &ids), vec![true, true]);
    }

    proptest! {
        /// Exactly the participants whose artifact appears more than once
        /// lose eligibility.
        #[test]
        fn flags_exactly_the_shared_artifacts(
            picks in proptest::collection::vec(0u8..6, 0..24),
        ) {
            let names: Vec<String> = picks.iter().map(|n| format!("art-{n}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut roster, ids) = submitted(&refs);
            detect_duplicates(&ids, &mut roster);

            for (id, name) in ids.iter().zip(&names) {
                let shared = names.iter().filter(|other| *other == name).count() > 1;
                prop_assert_eq!(roster.get(*id).unwrap().is_eligible(), !shared);
            }
        }
    }
}

//! Contest engine binary.
//!
//! Loads the contest configuration, enrolls and registers the configured
//! participants, then drives the contest through all of its sessions and
//! logs the outcome.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `contest-config.yaml` (or `CONTEST_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Enroll participants, validating their contact details
//! 4. Create the contest and register the on-time entrants
//! 5. Choose the rating source (scripted values or stdin)
//! 6. Run every session, letting late entrants try after applications close
//! 7. Log the summary

mod enrollment;
mod error;
mod late_entry;

use std::io;
use std::path::PathBuf;

use contest_core::config::{ContestConfig, RatingSourceKind};
use contest_core::{
    LineRatings, RatingSource, ScriptedRatings, TracingSink, run_contest, session,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::late_entry::LateEntryCallback;

/// Application entry point for the contest engine.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the summary
/// cannot be serialized.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration. The log level depends on it.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("contest-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        topic = config.contest.topic,
        participants = config.participants.len(),
        rating_source = ?config.ratings.source,
        "Contest configuration"
    );

    let mut sink = TracingSink;

    // 3. Enroll participants.
    let mut enrollment = enrollment::enroll_participants(&config.participants, &mut sink);

    // 4. Create the contest and register on-time entrants.
    let mut contest = session::create_contest(config.contest.topic.clone(), &mut sink);
    let registered = enrollment::register_entrants(
        &mut contest,
        &mut enrollment.roster,
        &enrollment.on_time,
        &mut sink,
    );
    info!(contest = %contest.id(), registered, "Registration window filled");

    // 5. Rating source.
    let stdin = io::stdin();
    let mut scripted;
    let mut lines;
    let ratings: &mut dyn RatingSource = match config.ratings.source {
        RatingSourceKind::Scripted => {
            scripted = ScriptedRatings::new(config.ratings.values.iter().cloned());
            &mut scripted
        }
        RatingSourceKind::Stdin => {
            lines = LineRatings::new(stdin.lock(), io::stdout());
            &mut lines
        }
    };

    // 6. Run the contest.
    let mut callback = LateEntryCallback::new(enrollment.late);
    let summary = run_contest(
        &mut contest,
        &mut enrollment.roster,
        ratings,
        &mut callback,
        &mut sink,
    );

    // 7. Log results.
    let summary_json = serde_json::to_string(&summary)?;
    info!(
        summary = %summary_json,
        skipped = enrollment.skipped.len(),
        late_accepted = callback.accepted(),
        "contest-engine shutdown complete"
    );

    Ok(())
}

/// Load the contest configuration.
///
/// The path comes from `CONTEST_CONFIG`, falling back to
/// `contest-config.yaml` in the working directory. A missing file yields
/// the defaults; the returned path is `None` in that case.
fn load_config() -> Result<(ContestConfig, Option<PathBuf>), EngineError> {
    let config_path = std::env::var_os("CONTEST_CONFIG")
        .map_or_else(|| PathBuf::from("contest-config.yaml"), PathBuf::from);
    if config_path.exists() {
        let config = ContestConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        let mut config = ContestConfig::default();
        config.apply_env_overrides();
        Ok((config, None))
    }
}

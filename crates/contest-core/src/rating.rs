//! Rating input.
//!
//! During the voting session the core asks a [`RatingSource`] for one raw
//! string per promoted participant and parses it itself. A string that is
//! not an integer, or a source that fails to answer, yields a rating of 0
//! and a [`Report::RatingFallback`] line. The fallback belongs to the core,
//! not to the source.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use contest_types::{Artifact, Identity, Report};
use tracing::{debug, warn};

use crate::sink::ReportSink;

/// Errors a rating source can raise.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// A scripted source ran out of values.
    #[error("no scripted rating left")]
    Exhausted,

    /// The input stream ended.
    #[error("rating input closed")]
    EndOfInput,

    /// Reading the input or writing the prompt failed.
    #[error("rating input failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// A source of raw rating strings.
pub trait RatingSource {
    /// Produce the raw rating for `artifact`, submitted by `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] when no input can be obtained. The caller
    /// treats that like unparseable input.
    fn raw_rating(&mut self, identity: &Identity, artifact: &Artifact)
    -> Result<String, RatingError>;
}

/// Hands out a fixed list of raw ratings, in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRatings {
    values: VecDeque<String>,
}

impl ScriptedRatings {
    /// Create a source from raw values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Values not yet handed out.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RatingSource for ScriptedRatings {
    fn raw_rating(
        &mut self,
        _identity: &Identity,
        _artifact: &Artifact,
    ) -> Result<String, RatingError> {
        self.values.pop_front().ok_or(RatingError::Exhausted)
    }
}

/// Reads one line per rating, writing a prompt first.
///
/// The engine wires this to stdin and stdout.
#[derive(Debug)]
pub struct LineRatings<R, W> {
    reader: R,
    prompt: W,
}

impl<R: BufRead, W: Write> LineRatings<R, W> {
    /// Create a line-based source.
    pub const fn new(reader: R, prompt: W) -> Self {
        Self { reader, prompt }
    }
}

impl<R: BufRead, W: Write> RatingSource for LineRatings<R, W> {
    fn raw_rating(
        &mut self,
        _identity: &Identity,
        artifact: &Artifact,
    ) -> Result<String, RatingError> {
        writeln!(self.prompt, "How many likes does '{artifact}' have?")?;
        self.prompt.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(RatingError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

/// Parse a raw rating as a decimal integer. Whitespace is not trimmed.
pub fn parse_rating(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

/// Obtain and parse the rating for one participant, falling back to 0.
pub fn collect_rating(
    source: &mut dyn RatingSource,
    identity: &Identity,
    artifact: &Artifact,
    sink: &mut dyn ReportSink,
) -> i32 {
    let raw = match source.raw_rating(identity, artifact) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(participant = %identity.name, %artifact, %err, "No rating received");
            sink.report(Report::RatingFallback {
                identity: identity.clone(),
                artifact: artifact.clone(),
                raw: None,
            });
            return 0;
        }
    };
    parse_rating(&raw).map_or_else(
        move || {
            sink.report(Report::RatingFallback {
                identity: identity.clone(),
                artifact: artifact.clone(),
                raw: Some(raw),
            });
            0
        },
        |rating| {
            debug!(participant = %identity.name, %artifact, rating, "Rating received");
            rating
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::sink::ReportLog;

    fn ann() -> Identity {
        Identity::named("Ann".to_owned())
    }

    #[test]
    fn parses_plain_integers_only() {
        assert_eq!(parse_rating("42"), Some(42));
        assert_eq!(parse_rating(" 42 "), None);
        assert_eq!(parse_rating("42\t"), None);
        assert_eq!(parse_rating("-3"), Some(-3));
        assert_eq!(parse_rating("many"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("4.5"), None);
    }

    #[test]
    fn scripted_ratings_in_order_then_exhausted() {
        let mut source = ScriptedRatings::new(["5", "3"]);
        let artifact = Artifact::new("a.jpg");
        assert_eq!(source.raw_rating(&ann(), &artifact).unwrap(), "5");
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.raw_rating(&ann(), &artifact).unwrap(), "3");
        assert!(matches!(
            source.raw_rating(&ann(), &artifact),
            Err(RatingError::Exhausted)
        ));
    }

    #[test]
    fn line_ratings_prompt_and_read() {
        let input = Cursor::new("7\nabc\n");
        let mut prompt = Vec::new();
        let artifact = Artifact::new("lake.png");
        {
            let mut source = LineRatings::new(input, &mut prompt);
            assert_eq!(source.raw_rating(&ann(), &artifact).unwrap(), "7");
            assert_eq!(source.raw_rating(&ann(), &artifact).unwrap(), "abc");
            assert!(matches!(
                source.raw_rating(&ann(), &artifact),
                Err(RatingError::EndOfInput)
            ));
        }
        let prompt = String::from_utf8(prompt).unwrap();
        assert_eq!(prompt.lines().count(), 3);
        assert!(prompt.starts_with("How many likes does 'lake.png' have?"));
    }

    #[test]
    fn padded_rating_falls_back_to_zero() {
        let mut source = ScriptedRatings::new([" 5 "]);
        let mut log = ReportLog::new();
        let rating = collect_rating(&mut source, &ann(), &Artifact::new("a.jpg"), &mut log);
        assert_eq!(rating, 0);
        assert!(matches!(
            log.reports(),
            [Report::RatingFallback { raw: Some(raw), .. }] if raw == " 5 "
        ));
    }

    #[test]
    fn collect_rating_falls_back_on_garbage() {
        let mut source = ScriptedRatings::new(["lots"]);
        let mut log = ReportLog::new();
        let rating = collect_rating(&mut source, &ann(), &Artifact::new("a.jpg"), &mut log);
        assert_eq!(rating, 0);
        assert_eq!(
            log.reports(),
            &[Report::RatingFallback {
                identity: ann(),
                artifact: Artifact::new("a.jpg"),
                raw: Some("lots".to_owned()),
            }]
        );
    }

    #[test]
    fn collect_rating_falls_back_when_source_fails() {
        let mut source = ScriptedRatings::default();
        let mut log = ReportLog::new();
        let rating = collect_rating(&mut source, &ann(), &Artifact::new("a.jpg"), &mut log);
        assert_eq!(rating, 0);
        assert!(matches!(
            log.reports().first(),
            Some(Report::RatingFallback { raw: None, .. })
        ));
    }

    #[test]
    fn collect_rating_passes_valid_input_silently() {
        let mut source = ScriptedRatings::new(["9"]);
        let mut log = ReportLog::new();
        let rating = collect_rating(&mut source, &ann(), &Artifact::new("a.jpg"), &mut log);
        assert_eq!(rating, 9);
        assert!(log.is_empty());
    }
}

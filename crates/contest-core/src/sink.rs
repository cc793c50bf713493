//! Report sinks.
//!
//! Every status line the core produces is handed to a [`ReportSink`]. The
//! engine uses [`TracingSink`]; tests and summaries use [`ReportLog`].

use contest_types::Report;
use tracing::info;

/// Receiver of status reports.
///
/// Reports arrive in the order their transitions happened. Within one
/// broadcast that is subscription order.
pub trait ReportSink {
    /// Accept one report.
    fn report(&mut self, report: Report);
}

/// Emits each report as an `info!` event carrying the rendered line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&mut self, report: Report) {
        info!(target: "contest::report", "{report}");
    }
}

/// Keeps every report in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLog {
    reports: Vec<Report>,
}

impl ReportLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// All reports received so far.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Rendered status lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.reports.iter().map(ToString::to_string).collect()
    }

    /// Number of reports received.
    pub const fn len(&self) -> usize {
        self.reports.len()
    }

    /// Whether nothing has been reported.
    pub const fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Drop all reports.
    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl ReportSink for ReportLog {
    fn report(&mut self, report: Report) {
        self.reports.push(report);
    }
}

//! Step reports.
//!
//! Every probe step fills a [`StepReport`] with marker-prefixed lines. The
//! runner renders each report to the console as soon as its step finishes.

mod render;

pub use render::{render_banner, render_closing, render_step};

use strum_macros::EnumIter;

/// Outcome marker printed in front of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Marker {
    /// ✅
    Pass,
    /// ❌
    Fail,
    /// ⚠️
    Warn,
    /// No marker (informational text)
    Plain,
}

impl Marker {
    /// Console symbol for the marker, including its trailing space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Marker::Pass => "✅ ",
            Marker::Fail => "❌ ",
            // The variation selector makes the glyph two columns wide
            Marker::Warn => "⚠️  ",
            Marker::Plain => "",
        }
    }
}

/// One printed line of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Outcome marker
    pub marker: Marker,
    /// Leading spaces before the marker
    pub indent: usize,
    /// Line text, without marker
    pub text: String,
}

impl Line {
    /// Creates an unindented line.
    pub fn new(marker: Marker, text: impl Into<String>) -> Self {
        Self {
            marker,
            indent: 0,
            text: text.into(),
        }
    }

    /// Returns the line indented by `indent` spaces.
    pub fn indented(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// The printed result of one independent probe step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Heading printed above the step's lines
    pub heading: String,
    /// Lines in print order
    pub lines: Vec<Line>,
}

impl StepReport {
    /// Creates an empty report for a step.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Appends a ✅ line.
    pub fn pass(&mut self, text: impl Into<String>) {
        self.push(Line::new(Marker::Pass, text));
    }

    /// Appends a ❌ line.
    pub fn fail(&mut self, text: impl Into<String>) {
        self.push(Line::new(Marker::Fail, text));
    }

    /// Appends a ⚠️ line.
    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(Line::new(Marker::Warn, text));
    }

    /// Appends a line without marker.
    pub fn plain(&mut self, text: impl Into<String>) {
        self.push(Line::new(Marker::Plain, text));
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.plain("");
    }

    /// Records a step failure as `❌ <prefix>: <error>`.
    ///
    /// With `with_trace`, the full error chain follows the failure line (and
    /// the backtrace, when `RUST_BACKTRACE` captured one).
    pub fn record_failure(&mut self, prefix: &str, err: &anyhow::Error, with_trace: bool) {
        log::warn!("{} failed: {:#}", self.heading, err);
        self.fail(format!("{prefix}: {err:#}"));
        if with_trace {
            for trace_line in format!("{err:?}").lines() {
                self.plain(trace_line);
            }
        }
    }

    /// Number of lines carrying `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.lines.iter().filter(|l| l.marker == marker).count()
    }

    /// Returns true if any line carries `marker` and contains `needle`.
    pub fn has_line(&self, marker: Marker, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|l| l.marker == marker && l.text.contains(needle))
    }
}

//! Probe runs.
//!
//! A run is a fixed sequence of independent steps. Each step fills its own
//! [`StepReport`]; an error inside a step is recorded on that step and the
//! run moves on, so the closing banner is always printed.

mod detailed;
mod display;

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::{Config, ProbeMode};
use crate::report::{render_banner, render_closing, render_step, StepReport};

/// Shared resources for the steps of one run.
pub struct ProbeContext {
    /// HTTP client used for every request
    pub client: reqwest::Client,
    /// Run configuration
    pub config: Config,
}

impl ProbeContext {
    /// Creates a new `ProbeContext`.
    pub fn new(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }
}

/// How a step's failure is printed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailureStyle {
    /// Text before the error message
    pub prefix: &'static str,
    /// Whether the error chain is printed after the failure line
    pub with_trace: bool,
}

/// Renders steps as they finish and keeps them for the run summary.
pub(crate) struct StepPrinter<'w, W: Write> {
    out: &'w mut W,
    width: usize,
    steps: Vec<StepReport>,
}

impl<'w, W: Write> StepPrinter<'w, W> {
    /// Prints the opening banner.
    pub fn start(out: &'w mut W, title: &str, width: usize) -> Result<Self> {
        render_banner(out, title, width).context("Failed to write report")?;
        Ok(Self {
            out,
            width,
            steps: Vec::new(),
        })
    }

    /// Settles a step: records its error, if any, then prints it.
    pub fn finish_step(
        &mut self,
        mut step: StepReport,
        outcome: Result<()>,
        style: FailureStyle,
    ) -> Result<()> {
        if let Err(e) = outcome {
            step.record_failure(style.prefix, &e, style.with_trace);
        }
        render_step(&mut *self.out, &step, self.width).context("Failed to write report")?;
        self.out.flush().context("Failed to write report")?;
        self.steps.push(step);
        Ok(())
    }

    /// Prints the closing banner and returns the finished steps.
    pub fn close(self, title: &str) -> Result<Vec<StepReport>> {
        render_closing(self.out, title, self.width).context("Failed to write report")?;
        Ok(self.steps)
    }
}

/// Runs the steps of `ctx.config.mode`, printing to `out`.
///
/// # Errors
///
/// Only failures to write to `out` are returned; step failures are part of
/// the returned reports.
pub async fn run_steps<W: Write>(ctx: &ProbeContext, out: &mut W) -> Result<Vec<StepReport>> {
    match ctx.config.mode {
        ProbeMode::Detailed => detailed::run(ctx, out).await,
        ProbeMode::Display => display::run(ctx, out).await,
    }
}

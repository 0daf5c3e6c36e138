//! halalguard_probe library: diagnostic probing of a deployed HalalGuard site
//!
//! This library checks whether the site's homepage HTML, its built JavaScript
//! bundle and its transactions API are wired together, and prints a
//! human-readable report of every check.
//!
//! # Example
//!
//! ```no_run
//! use halalguard_probe::{Config, ProbeMode, run_probe};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     mode: ProbeMode::Display,
//!     ..Default::default()
//! };
//!
//! let report = run_probe(config).await?;
//! println!("{} checks failed", report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Requests are still issued strictly
//! one after another.

#![warn(missing_docs)]

pub mod analysis;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod probe;
pub mod report;

// Re-export public API
pub use config::{Config, FailOn, LogFormat, LogLevel, ProbeMode};
pub use run::{run_probe, run_probe_to, ProbeReport};

// Internal run module (ties configuration, client and step sequence together)
mod run {
    use std::io::Write;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::config::{Config, FailOn, ProbeMode};
    use crate::initialization::init_client;
    use crate::probe::{run_steps, ProbeContext};
    use crate::report::{Marker, StepReport};

    /// Results of a probe run.
    ///
    /// The console output is the primary result; this summary exists for the
    /// exit code policy and for library callers.
    #[derive(Debug, Clone)]
    pub struct ProbeReport {
        /// Which run was performed
        pub mode: ProbeMode,
        /// Every step, in execution order
        pub steps: Vec<StepReport>,
        /// Number of ✅ lines
        pub passed: usize,
        /// Number of ❌ lines (failed checks and failed steps)
        pub failed: usize,
        /// Number of ⚠️ lines
        pub warnings: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl ProbeReport {
        fn new(mode: ProbeMode, steps: Vec<StepReport>, elapsed_seconds: f64) -> Self {
            let total = |marker: Marker| -> usize { steps.iter().map(|s| s.count(marker)).sum() };
            Self {
                mode,
                passed: total(Marker::Pass),
                failed: total(Marker::Fail),
                warnings: total(Marker::Warn),
                steps,
                elapsed_seconds,
            }
        }

        /// Process exit code under `policy`.
        pub fn exit_code(&self, policy: FailOn) -> i32 {
            match policy {
                FailOn::Never => 0,
                FailOn::AnyFailure if self.failed > 0 => 2,
                FailOn::AnyFailure => 0,
            }
        }
    }

    /// Runs a probe and prints its report to standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or standard output
    /// cannot be written. Failed checks and failed requests are not errors;
    /// they are part of the report.
    pub async fn run_probe(config: Config) -> Result<ProbeReport> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        run_probe_to(config, &mut out).await
    }

    /// Runs a probe and prints its report to `out`.
    ///
    /// # Errors
    ///
    /// Same as [`run_probe`].
    pub async fn run_probe_to<W: Write>(config: Config, out: &mut W) -> Result<ProbeReport> {
        let start = Instant::now();
        let mode = config.mode;
        info!("Probing {} ({:?} run)", config.origin, mode);

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let ctx = ProbeContext::new(client, config);
        let steps = run_steps(&ctx, out).await?;

        let report = ProbeReport::new(mode, steps, start.elapsed().as_secs_f64());
        info!(
            "Run finished in {:.1}s: {} passed, {} failed, {} warnings",
            report.elapsed_seconds, report.passed, report.failed, report.warnings
        );
        Ok(report)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn report_with(failures: usize) -> ProbeReport {
            let mut step = StepReport::new("TEST");
            step.pass("ok");
            step.warn("meh");
            for _ in 0..failures {
                step.fail("bad");
            }
            ProbeReport::new(ProbeMode::Detailed, vec![step], 0.1)
        }

        #[test]
        fn test_report_totals() {
            let report = report_with(2);
            assert_eq!(report.passed, 1);
            assert_eq!(report.failed, 2);
            assert_eq!(report.warnings, 1);
        }

        #[test]
        fn test_exit_code_never() {
            assert_eq!(report_with(3).exit_code(FailOn::Never), 0);
        }

        #[test]
        fn test_exit_code_any_failure() {
            assert_eq!(report_with(1).exit_code(FailOn::AnyFailure), 2);
            assert_eq!(report_with(0).exit_code(FailOn::AnyFailure), 0);
        }
    }
}

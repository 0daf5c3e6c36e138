//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `halalguard_probe` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - The exit code policy
//!
//! All probing is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use halalguard_probe::config::Opt;
use halalguard_probe::initialization::init_logger_with;
use halalguard_probe::{run_probe, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env next to the working directory may set HALALGUARD_ORIGIN
    let _ = dotenvy::dotenv();

    // Exit 2 is reserved for --fail-on, so usage errors exit 1 instead of clap's 2
    let opt = match Opt::try_parse() {
        Ok(opt) => opt,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    let config = Config::from(opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let fail_on = config.fail_on;
    match run_probe(config).await {
        Ok(report) => {
            let code = report.exit_code(fail_on);
            if code != 0 {
                process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("halalguard_probe error: {:#}", e);
            process::exit(1);
        }
    }
}

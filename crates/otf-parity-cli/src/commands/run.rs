//! Run command implementation.

use crate::env_file;
use crate::errors::CliError;
use crate::output;
use otf_parity_harness::{
    standard_probes, write_report, BodyCompositionWindow, Credentials, GuardedFailurePolicy,
    Harness, HarnessConfig, ReplayAuthenticator,
};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

/// Capture file used when `--capture` is absent.
pub const CAPTURE_VAR: &str = "OTF_PARITY_CAPTURE";

pub struct RunArgs {
    pub capture: Option<PathBuf>,
    pub output: PathBuf,
    pub env_file: PathBuf,
    pub body_composition_window: BodyCompositionWindow,
    pub guarded_failures: GuardedFailurePolicy,
    pub client_version: Option<String>,
}

/// Runs the battery and returns the process exit code.
///
/// Missing credentials or a rejected session abort before any probe runs
/// and no report is written.
pub fn run(args: RunArgs) -> Result<i32, Box<dyn std::error::Error>> {
    match env_file::load(&args.env_file)
        .map_err(|e| format!("Failed to read {}: {}", args.env_file.display(), e))?
    {
        Some(keys) => info!(path = %args.env_file.display(), ?keys, "environment file loaded"),
        None => debug!(path = %args.env_file.display(), "no environment file"),
    }

    let credentials = Credentials::from_env()?;
    let capture = args
        .capture
        .or_else(|| env::var_os(CAPTURE_VAR).map(PathBuf::from))
        .ok_or(CliError::MissingCapture(CAPTURE_VAR))?;

    let mut config = HarnessConfig {
        body_composition_window: args.body_composition_window,
        guarded_failures: args.guarded_failures,
        ..HarnessConfig::default()
    };
    if let Some(version) = args.client_version {
        config.client_version_expected = version;
    }

    println!("Running parity probes for {}", credentials.email);
    let authenticator = ReplayAuthenticator::new(capture);
    let harness = Harness::connect(&authenticator, &credentials, config)?;
    let report = harness.run(&standard_probes())?;

    write_report(&report, &args.output)?;
    output::print_run_summary(&report, &args.output);
    Ok(report.status().exit_code())
}

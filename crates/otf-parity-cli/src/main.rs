//! otf-parity CLI - runs the probe battery and inspects parity reports.

use clap::{Parser, Subcommand, ValueEnum};
use otf_parity_harness::{BodyCompositionWindow, GuardedFailurePolicy, DEFAULT_REPORT_PATH};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod env_file;
mod errors;
mod output;

use commands::{canonicalize, run, summary};

/// Enables JSON log lines on stderr.
const LOG_JSON_VAR: &str = "OTF_PARITY_LOG_JSON";

#[derive(Parser)]
#[command(name = "otf-parity")]
#[command(about = "OTF API parity probes and canonical report tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every probe against a session and write the report
    Run {
        /// Capture file backing the session (default: $OTF_PARITY_CAPTURE)
        #[arg(long)]
        capture: Option<PathBuf>,
        /// Report output path
        #[arg(long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,
        /// Environment file loaded before reading credentials
        #[arg(long, default_value = ".env")]
        env_file: PathBuf,
        /// Whether the body composition window filters scans
        #[arg(long, value_enum, default_value_t = WindowArg::Unbounded)]
        body_composition_window: WindowArg,
        /// Whether guarded failures are copied into the error list
        #[arg(long, value_enum, default_value_t = GuardedFailuresArg::TestsOnly)]
        guarded_failures: GuardedFailuresArg,
        /// Expected client library version recorded in the report
        #[arg(long)]
        client_version: Option<String>,
    },
    /// Re-render JSON with keys sorted at every level
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Summarize a written report
    Summary {
        /// Path to report file
        report: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WindowArg {
    /// Report every scan; the window is informational
    Unbounded,
    /// Keep only scans inside the window
    Enforce,
}

impl From<WindowArg> for BodyCompositionWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Unbounded => BodyCompositionWindow::Unbounded,
            WindowArg::Enforce => BodyCompositionWindow::Enforce,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GuardedFailuresArg {
    /// Record guarded failures under tests only
    TestsOnly,
    /// Also append guarded failures to the error list
    Mirror,
}

impl From<GuardedFailuresArg> for GuardedFailurePolicy {
    fn from(arg: GuardedFailuresArg) -> Self {
        match arg {
            GuardedFailuresArg::TestsOnly => GuardedFailurePolicy::TestsOnly,
            GuardedFailuresArg::Mirror => GuardedFailurePolicy::Mirror,
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_flag(LOG_JSON_VAR) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Run {
            capture,
            output,
            env_file,
            body_composition_window,
            guarded_failures,
            client_version,
        } => run::run(run::RunArgs {
            capture,
            output,
            env_file,
            body_composition_window: body_composition_window.into(),
            guarded_failures: guarded_failures.into(),
            client_version,
        }),
        Commands::Canonicalize { input } => canonicalize::run(input).map(|()| 0),
        Commands::Summary { report, json } => summary::run(report, json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

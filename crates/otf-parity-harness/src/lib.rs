//! Probe harness for fitness API client parity checks.
//!
//! This crate provides:
//! - The session boundary ([`FitnessClient`], [`Authenticator`]) and a
//!   capture-backed replay session
//! - The fixed probe battery ([`standard_probes`])
//! - A sequential runner that isolates probe failures ([`Harness`])
//! - Report assembly, run status and key-sorted report output
//!
//! ## Quick Start
//!
//! ```no_run
//! use otf_parity_harness::{
//!     standard_probes, write_report, Credentials, Harness, HarnessConfig, ReplayAuthenticator,
//! };
//! use std::path::Path;
//!
//! let credentials = Credentials::from_env()?;
//! let auth = ReplayAuthenticator::new("capture.json");
//! let harness = Harness::connect(&auth, &credentials, HarnessConfig::default())?;
//! let report = harness.run(&standard_probes())?;
//! write_report(&report, Path::new("integration-test-results-rust.json"))?;
//! std::process::exit(report.status().exit_code());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Time sources.
pub mod clock;
/// Harness settings.
pub mod config;
/// Error types.
pub mod errors;
/// Sequential probe runner.
pub mod harness;
/// Probe outcomes.
pub mod outcome;
/// Probe definition and context.
pub mod probe;
/// The fixed probe battery.
pub mod probes;
/// Capture-backed session.
pub mod replay;
/// Aggregate report and run status.
pub mod report;
/// Session and authentication boundary.
pub mod session;
/// Report file output.
pub mod writer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BodyCompositionWindow, GuardedFailurePolicy, HarnessConfig};
pub use errors::{ClientError, ProbeError, RunError, SessionError, WriteError};
pub use harness::Harness;
pub use outcome::{ProbeOutcome, ProbeSuccess};
pub use probe::{Probe, ProbeContext};
pub use probes::{filter_by_calories, standard_probes};
pub use replay::{Capture, ReplayAuthenticator, ReplayClient};
pub use report::{Report, RunStatus, RunSummary};
pub use session::{Authenticator, Credentials, FitnessClient};
pub use writer::{read_report, render_report, write_report, DEFAULT_REPORT_PATH};

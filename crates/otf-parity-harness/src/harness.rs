//! Sequential, fault-isolated probe runner.

use crate::clock::{Clock, SystemClock};
use crate::config::{GuardedFailurePolicy, HarnessConfig};
use crate::errors::{ProbeError, RunError, SessionError};
use crate::outcome::ProbeOutcome;
use crate::probe::{Probe, ProbeContext};
use crate::report::Report;
use crate::session::{Authenticator, Credentials, FitnessClient};
use otf_parity_canonical::temporal::iso_datetime;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info, info_span, warn};

/// Owns one authenticated session and runs probes against it.
pub struct Harness {
    client: Box<dyn FitnessClient>,
    clock: Box<dyn Clock>,
    config: HarnessConfig,
}

impl Harness {
    /// Wraps an already-authenticated session.
    pub fn new(client: Box<dyn FitnessClient>, config: HarnessConfig) -> Self {
        Self {
            client,
            clock: Box::new(SystemClock),
            config,
        }
    }

    /// Acquires the session once. Failure here is fatal: no probe runs.
    pub fn connect(
        authenticator: &dyn Authenticator,
        credentials: &Credentials,
        config: HarnessConfig,
    ) -> Result<Self, SessionError> {
        let client = authenticator.authenticate(credentials)?;
        info!(email = %credentials.email, "session acquired");
        Ok(Self::new(client, config))
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Harness settings.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs every probe in order and returns the finished report.
    ///
    /// A failing or panicking probe is recorded and the loop moves on.
    /// Raised failures are prefixed with the probe's failure prefix and also
    /// appended to the flat error list; guarded failures are appended only
    /// under [`GuardedFailurePolicy::Mirror`].
    ///
    /// Probe names must be unique; a repeated name is rejected before any
    /// probe runs.
    pub fn run(&self, probes: &[Probe]) -> Result<Report, RunError> {
        let mut seen = BTreeSet::new();
        for probe in probes {
            if !seen.insert(probe.name.as_str()) {
                return Err(RunError::DuplicateProbe(probe.name.clone()));
            }
        }

        let mut report = Report::new(
            iso_datetime(&self.clock.now()),
            self.config.environment_version.clone(),
            self.config.client_version_expected.clone(),
        );

        for probe in probes {
            let span = info_span!("probe", name = %probe.name);
            let _guard = span.enter();
            info!("running probe");

            let result = {
                let ctx = ProbeContext {
                    client: self.client.as_ref(),
                    report: &report,
                    clock: self.clock.as_ref(),
                    config: &self.config,
                };
                panic::catch_unwind(AssertUnwindSafe(|| probe.execute(&ctx)))
                    .unwrap_or_else(|payload| Err(ProbeError::raised(panic_message(payload))))
            };

            let outcome = match result {
                Ok(success) => {
                    info!("probe passed");
                    ProbeOutcome::from(success)
                }
                Err(err) if err.is_guarded() => {
                    let message = err.to_string();
                    warn!(reason = %message, "probe found no data");
                    if self.config.guarded_failures == GuardedFailurePolicy::Mirror {
                        report.push_error(message.clone());
                    }
                    ProbeOutcome::failure(message)
                }
                Err(err) => {
                    let message = format!("{}: {}", probe.failure_prefix, err);
                    error!(error = %message, "probe failed");
                    report.push_error(message.clone());
                    ProbeOutcome::failure(message)
                }
            };
            report.record(probe.name.clone(), outcome);
        }

        let summary = report.summary();
        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "run complete"
        );
        Ok(report)
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

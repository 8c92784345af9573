use crate::clock::Clock;
use crate::config::HarnessConfig;
use crate::errors::ProbeError;
use crate::outcome::ProbeSuccess;
use crate::report::Report;
use crate::session::FitnessClient;
use otf_parity_canonical::ProbeName;
use std::fmt;

/// What a probe sees while it runs.
pub struct ProbeContext<'a> {
    /// The run's session.
    pub client: &'a dyn FitnessClient,
    /// Outcomes of the probes that already ran.
    pub report: &'a Report,
    /// Time source.
    pub clock: &'a dyn Clock,
    /// Harness settings.
    pub config: &'a HarnessConfig,
}

/// Probe body.
pub type ProbeFn = dyn Fn(&ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError>;

/// One named, independently failable unit of the run.
pub struct Probe {
    /// Report key.
    pub name: ProbeName,
    /// Prepended to messages of raised failures, e.g. `Member details failed`.
    pub failure_prefix: String,
    execute: Box<ProbeFn>,
}

impl Probe {
    /// Builds a probe.
    pub fn new<F>(name: ProbeName, failure_prefix: impl Into<String>, execute: F) -> Self
    where
        F: Fn(&ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> + 'static,
    {
        Self {
            name,
            failure_prefix: failure_prefix.into(),
            execute: Box::new(execute),
        }
    }

    /// Runs the probe body.
    pub fn execute(&self, ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
        (self.execute)(ctx)
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probe")
            .field("name", &self.name)
            .field("failure_prefix", &self.failure_prefix)
            .finish_non_exhaustive()
    }
}

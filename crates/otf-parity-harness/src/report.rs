use crate::outcome::ProbeOutcome;
use otf_parity_canonical::{CanonicalMap, CanonicalValue, Canonicalize, ProbeName};

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every probe succeeded.
    Success,
    /// At least one probe failed, or the run never started.
    Failure,
}

impl RunStatus {
    /// Process exit code for this status.
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failure => 1,
        }
    }
}

/// Probe counts of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of recorded probes.
    pub total: usize,
    /// Probes that succeeded.
    pub passed: usize,
    /// Probes that failed.
    pub failed: usize,
}

impl RunSummary {
    /// Success iff nothing failed.
    pub fn status(&self) -> RunStatus {
        if self.failed == 0 {
            RunStatus::Success
        } else {
            RunStatus::Failure
        }
    }
}

/// Aggregate record of one run.
///
/// Outcomes keep probe declaration order; `errors` is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Run start, ISO-8601 local time.
    pub timestamp: String,
    /// Description of the implementation that produced the report.
    pub environment_version: String,
    /// Client library version the run was expected against.
    pub client_version_expected: String,
    tests: Vec<(ProbeName, ProbeOutcome)>,
    errors: Vec<String>,
}

impl Report {
    /// Creates an empty report.
    pub fn new(
        timestamp: impl Into<String>,
        environment_version: impl Into<String>,
        client_version_expected: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            environment_version: environment_version.into(),
            client_version_expected: client_version_expected.into(),
            tests: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Records an outcome; a repeated name replaces the earlier outcome in place.
    pub fn record(&mut self, name: ProbeName, outcome: ProbeOutcome) {
        match self.tests.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = outcome,
            None => self.tests.push((name, outcome)),
        }
    }

    /// Appends a message to the flat error list.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Outcome of the named probe, if it has run.
    pub fn outcome(&self, name: &str) -> Option<&ProbeOutcome> {
        self.tests
            .iter()
            .find(|(existing, _)| existing.as_str() == name)
            .map(|(_, outcome)| outcome)
    }

    /// Outcomes in declaration order.
    pub fn tests(&self) -> impl Iterator<Item = (&ProbeName, &ProbeOutcome)> {
        self.tests.iter().map(|(name, outcome)| (name, outcome))
    }

    /// Flat error list.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Counts passed and failed probes.
    pub fn summary(&self) -> RunSummary {
        let total = self.tests.len();
        let passed = self.tests.iter().filter(|(_, o)| o.is_success()).count();
        RunSummary {
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Shorthand for `self.summary().status()`.
    pub fn status(&self) -> RunStatus {
        self.summary().status()
    }
}

impl Canonicalize for Report {
    fn canonicalize(&self) -> CanonicalValue {
        let tests: CanonicalMap = self
            .tests
            .iter()
            .map(|(name, outcome)| (name.to_string(), outcome.canonicalize()))
            .collect();
        let mut map = CanonicalMap::new();
        map.insert("timestamp", self.timestamp.as_str());
        map.insert("environment_version", self.environment_version.as_str());
        map.insert("client_version_expected", self.client_version_expected.as_str());
        map.insert("tests", tests);
        map.insert("errors", self.errors.canonicalize());
        CanonicalValue::Map(map)
    }
}

use otf_parity_canonical::ProbeName;
use otf_parity_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a client session call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The remote side rejected or failed the request.
    #[error("{message}")]
    Request {
        /// Client operation that failed.
        operation: &'static str,
        /// Human-readable failure message.
        message: String,
    },
    /// The response could not be mapped into records.
    #[error("invalid response from {operation}: {source}")]
    Decode {
        /// Client operation that failed.
        operation: &'static str,
        /// Underlying parse failure.
        #[source]
        source: ModelError,
    },
}

/// Fatal errors raised before any probe runs.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A required credential variable is absent or empty.
    #[error("{0} environment variable required")]
    MissingCredential(&'static str),
    /// The capture backing a replay session could not be read.
    #[error("failed to read capture {path}: {source}")]
    CaptureIo {
        /// Capture path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The capture is not valid JSON of the expected shape.
    #[error("invalid capture: {0}")]
    CaptureFormat(#[from] serde_json::Error),
    /// A captured record could not be parsed.
    #[error("invalid capture record: {0}")]
    CaptureRecord(#[from] ModelError),
    /// The authentication collaborator refused the credentials.
    #[error("authentication failed: {0}")]
    Rejected(String),
}

/// Failure of a single probe.
///
/// `Raised` wraps an error coming out of a client call or probe logic;
/// `NoData` is a deliberate guard when a probe has nothing to inspect.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// An error propagated out of the probe.
    #[error("{message}")]
    Raised {
        /// Human-readable failure message.
        message: String,
        /// Underlying cause, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// A guarded "nothing to report" branch.
    #[error("{0}")]
    NoData(String),
}

impl ProbeError {
    /// A raised failure without an underlying cause.
    pub fn raised(message: impl Into<String>) -> Self {
        ProbeError::Raised {
            message: message.into(),
            source: None,
        }
    }

    /// A guarded "no data" failure.
    pub fn no_data(message: impl Into<String>) -> Self {
        ProbeError::NoData(message.into())
    }

    /// Returns true for guarded failures.
    pub fn is_guarded(&self) -> bool {
        matches!(self, ProbeError::NoData(_))
    }
}

impl From<ClientError> for ProbeError {
    fn from(err: ClientError) -> Self {
        ProbeError::Raised {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// A probe list that cannot produce a well-formed report.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunError {
    /// Two probes share a report key.
    #[error("duplicate probe name: {0}")]
    DuplicateProbe(ProbeName),
}

/// Errors writing or reading a report file.
#[derive(Error, Debug)]
pub enum WriteError {
    /// I/O error on the report path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Report path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

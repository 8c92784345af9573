use thiserror::Error;

/// Failures raised by the CLI itself rather than the libraries it drives.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("no capture file: pass --capture or set {0}")]
    MissingCapture(&'static str),
    #[error("malformed report: {0}")]
    MalformedReport(&'static str),
}

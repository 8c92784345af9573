//! Report file output.
//!
//! The file is UTF-8 JSON with 2-space indentation and object keys sorted at
//! every level, so two reports can be compared with a plain diff.

use crate::errors::WriteError;
use crate::report::Report;
use otf_parity_canonical::{CanonicalValue, Canonicalize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default report file name.
pub const DEFAULT_REPORT_PATH: &str = "integration-test-results-rust.json";

/// Renders a report as key-sorted, 2-space indented JSON.
pub fn render_report(report: &Report) -> Result<String, WriteError> {
    Ok(report.canonicalize().to_pretty_sorted_string()?)
}

/// Writes a report to `path`, creating parent directories as needed.
pub fn write_report(report: &Report, path: &Path) -> Result<(), WriteError> {
    let rendered = render_report(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, rendered).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Reads a report file back as a canonical tree (file key order).
pub fn read_report(path: &Path) -> Result<CanonicalValue, WriteError> {
    let text = fs::read_to_string(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(CanonicalValue::from_json(&value))
}

//! Output formatting utilities.

use otf_parity_canonical::Digest;
use otf_parity_harness::{Report, RunSummary};
use std::path::Path;

/// One probe row of a report summary.
pub struct ProbeLine {
    pub name: String,
    pub success: bool,
    pub digest: Option<Digest>,
    pub error: Option<String>,
}

/// Prints the closing block of a run.
pub fn print_run_summary(report: &Report, path: &Path) {
    println!("{}", "=".repeat(60));
    println!("Results written to: {}", path.display());
    for (name, outcome) in report.tests() {
        let mark = if outcome.is_success() { "PASS" } else { "FAIL" };
        match outcome.error() {
            Some(error) => println!("  {} {:<20} {}", mark, name, error),
            None => println!("  {} {}", mark, name),
        }
    }
    print_totals(&report.summary(), report.errors());
}

/// Prints totals and the flat error list.
pub fn print_totals(summary: &RunSummary, errors: &[String]) {
    println!("Test Summary:");
    println!("   Total: {}", summary.total);
    println!("   Passed: {}", summary.passed);
    println!("   Failed: {}", summary.failed);
    if !errors.is_empty() {
        println!("Errors encountered: {}", errors.len());
        for error in errors {
            println!("   - {}", error);
        }
    }
}

/// Formats a probe as a table row.
pub fn format_table_row(line: &ProbeLine) -> String {
    let status = if line.success { "pass" } else { "fail" };
    let detail = match (&line.digest, &line.error) {
        (Some(digest), _) => digest.b64.clone(),
        (None, Some(error)) => truncate(error, 60),
        (None, None) => "-".to_string(),
    };
    format!("{:<22} {:<6} {}", truncate(&line.name, 22), status, detail)
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<22} {:<6} {}", "PROBE", "STATUS", "DATA_DIGEST");
    println!("{}", "-".repeat(72));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

//! Summary command implementation.

use crate::errors::CliError;
use crate::output::{self, ProbeLine};
use otf_parity_canonical::{CanonicalMap, CanonicalValue, Digest};
use otf_parity_harness::{read_report, RunSummary};
use std::path::PathBuf;

pub fn run(report: PathBuf, json_output: bool) -> Result<i32, Box<dyn std::error::Error>> {
    let document = read_report(&report)?;
    let tests = document
        .get("tests")
        .and_then(CanonicalValue::as_map)
        .ok_or(CliError::MalformedReport("missing tests object"))?;

    let mut lines = Vec::with_capacity(tests.len());
    for (name, outcome) in tests.iter() {
        let success = outcome.get("success") == Some(&CanonicalValue::Bool(true));
        let digest = match outcome.get("data") {
            Some(data) => Some(Digest::of(data)?),
            None => None,
        };
        lines.push(ProbeLine {
            name: name.to_string(),
            success,
            digest,
            error: outcome.get("error").and_then(CanonicalValue::as_str).map(str::to_string),
        });
    }
    let errors: Vec<String> = document
        .get("errors")
        .and_then(CanonicalValue::as_sequence)
        .unwrap_or(&[])
        .iter()
        .filter_map(|e| e.as_str().map(str::to_string))
        .collect();

    let passed = lines.iter().filter(|l| l.success).count();
    let summary = RunSummary {
        total: lines.len(),
        passed,
        failed: lines.len() - passed,
    };

    if json_output {
        println!("{}", summary_json(&summary, &lines, &errors).to_pretty_sorted_string()?);
    } else {
        output::print_table_header();
        for line in &lines {
            println!("{}", output::format_table_row(line));
        }
        output::print_totals(&summary, &errors);
    }
    Ok(summary.status().exit_code())
}

fn summary_json(summary: &RunSummary, lines: &[ProbeLine], errors: &[String]) -> CanonicalValue {
    let tests: CanonicalMap = lines
        .iter()
        .map(|line| {
            let mut entry = CanonicalMap::new();
            entry.insert("success", line.success);
            entry.insert("digest", line.digest.as_ref().map(|d| d.b64.clone()));
            (line.name.clone(), CanonicalValue::Map(entry))
        })
        .collect();
    let mut map = CanonicalMap::new();
    map.insert("total", summary.total);
    map.insert("passed", summary.passed);
    map.insert("failed", summary.failed);
    map.insert("tests", tests);
    map.insert(
        "errors",
        errors.iter().map(|e| CanonicalValue::from(e.as_str())).collect::<Vec<_>>(),
    );
    CanonicalValue::Map(map)
}

//! Integration tests for CLI commands.

use chrono::{Duration, Local};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const EMAIL: &str = "jordan@example.com";

fn recent(days_ago: i64) -> String {
    (Local::now().naive_local() - Duration::days(days_ago))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

fn capture_document(failures: Value) -> Value {
    json!({
        "records": [
            {
                "kind": "member",
                "member_uuid": "m-123",
                "member_id": 4411,
                "first_name": "Jordan",
                "last_name": "Lee",
                "email": EMAIL,
                "home_studio": {"studio_uuid": "s-9", "name": "Downtown", "status": "Active"}
            },
            {
                "kind": "workout",
                "class_history_uuid": "w-1",
                "performance_summary_id": "ps-1",
                "starts_at": recent(2),
                "calories_burned": 512
            },
            {
                "kind": "workout",
                "class_history_uuid": "w-2",
                "performance_summary_id": "ps-2",
                "starts_at": recent(9),
                "calories_burned": 40
            },
            {
                "kind": "body_composition",
                "member_uuid": "m-123",
                "scan_datetime": recent(20),
                "weight": 72.0,
                "body_fat_percent": 18.5,
                "skeletal_muscle_mass": 33.0
            },
            {
                "kind": "booking",
                "booking_uuid": "b-1",
                "status": "Booked",
                "starts_at": recent(-3)
            }
        ],
        "failures": failures
    })
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(failures: Value) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("capture.json"),
            serde_json::to_string(&capture_document(failures)).unwrap(),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn command(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_otf-parity"));
    cmd.current_dir(cwd)
        .env_remove("OTF_EMAIL")
        .env_remove("OTF_PASSWORD")
        .env_remove("OTF_PARITY_CAPTURE")
        .env_remove("OTF_PARITY_LOG_JSON")
        .env("RUST_LOG", "warn");
    cmd
}

fn run_cli(mut cmd: Command, args: &[&str]) -> (i32, String, String) {
    let output = cmd.args(args).output().expect("Failed to execute CLI");
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn run_probes(ws: &Workspace, extra: &[&str]) -> (i32, String, String) {
    let mut cmd = command(ws.dir.path());
    cmd.env("OTF_EMAIL", EMAIL);
    let capture = ws.path("capture.json");
    let output = ws.path("report.json");
    let env_file = ws.path("missing.env");
    let mut args = vec![
        "run",
        "--capture",
        capture.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--env-file",
        env_file.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run_cli(cmd, &args)
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_run_all_probes_pass() {
    let ws = Workspace::new(json!({}));

    let (code, stdout, stderr) = run_probes(&ws, &[]);
    assert_eq!(code, 0, "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains("Passed: 6"));

    let report = read_json(&ws.path("report.json"));
    assert_eq!(report["client_version_expected"], "0.15.4");
    assert_eq!(report["errors"], json!([]));
    assert_eq!(report["tests"]["recent_workouts"]["original_count"], 2);
    assert_eq!(report["tests"]["recent_workouts"]["count"], 1);
    assert_eq!(report["tests"]["performance_summary"]["performance_summary_id"], "ps-1");
    assert_eq!(report["tests"]["body_composition"]["data"][0]["weight"], json!(72.0));
}

#[test]
fn test_run_report_keys_are_sorted() {
    let ws = Workspace::new(json!({}));
    let (code, _, _) = run_probes(&ws, &[]);
    assert_eq!(code, 0);

    let text = std::fs::read_to_string(ws.path("report.json")).unwrap();
    let positions: Vec<usize> = [
        "\"client_version_expected\"",
        "\"environment_version\"",
        "\"errors\"",
        "\"tests\"",
        "\"timestamp\"",
    ]
    .iter()
    .map(|key| text.find(key).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(text.contains("\n  \"tests\": {\n    \"body_composition\": {"));
    assert!(text.contains("\"weight\": 72.0"));
}

#[test]
fn test_run_without_email_is_fatal() {
    let ws = Workspace::new(json!({}));
    let capture = ws.path("capture.json");
    let output = ws.path("report.json");
    let env_file = ws.path("missing.env");

    let (code, _, stderr) = run_cli(
        command(ws.dir.path()),
        &[
            "run",
            "--capture",
            capture.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--env-file",
            env_file.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: OTF_EMAIL environment variable required"));
    assert!(!output.exists());
}

#[test]
fn test_run_reads_email_from_env_file() {
    let ws = Workspace::new(json!({}));
    std::fs::write(ws.path(".env"), format!("# local\nOTF_EMAIL=\"{}\"\n", EMAIL)).unwrap();
    let capture = ws.path("capture.json");

    let (code, stdout, _) = run_cli(
        command(ws.dir.path()),
        &["run", "--capture", capture.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains(EMAIL));
    assert!(ws.path("integration-test-results-rust.json").exists());
}

#[test]
fn test_run_rejects_other_account() {
    let ws = Workspace::new(json!({}));
    let mut cmd = command(ws.dir.path());
    cmd.env("OTF_EMAIL", "someone.else@example.com")
        .env("OTF_PARITY_CAPTURE", ws.path("capture.json"));
    let output = ws.path("report.json");

    let (code, _, stderr) = run_cli(
        cmd,
        &["run", "--output", output.to_str().unwrap(), "--env-file", "none.env"],
    );
    assert_eq!(code, 1);
    assert!(
        stderr.contains(
            "Error: authentication failed: capture belongs to a different account than someone.else@example.com"
        ),
        "stderr: {}",
        stderr
    );
    assert!(!output.exists());
}

#[test]
fn test_run_without_capture_is_fatal() {
    let ws = Workspace::new(json!({}));
    let mut cmd = command(ws.dir.path());
    cmd.env("OTF_EMAIL", EMAIL);
    let output = ws.path("report.json");

    let (code, _, stderr) = run_cli(
        cmd,
        &["run", "--output", output.to_str().unwrap(), "--env-file", "none.env"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: no capture file: pass --capture or set OTF_PARITY_CAPTURE"));
    assert!(!output.exists());
}

#[test]
fn test_run_malformed_record_fails_only_its_probe() {
    let ws = Workspace::new(json!({}));
    let mut document = capture_document(json!({}));
    document["records"][3]
        .as_object_mut()
        .unwrap()
        .remove("body_fat_percent");
    std::fs::write(ws.path("capture.json"), document.to_string()).unwrap();

    let (code, _, _) = run_probes(&ws, &[]);
    assert_eq!(code, 1);

    let report = read_json(&ws.path("report.json"));
    let tests = report["tests"].as_object().unwrap();
    assert_eq!(tests.len(), 6);
    let failed: Vec<&str> = tests
        .iter()
        .filter(|(_, outcome)| outcome["success"] == false)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(failed, vec!["body_composition"]);
    assert!(report["tests"]["body_composition"]["error"]
        .as_str()
        .unwrap()
        .starts_with("Body composition failed: invalid response from body_composition_list"));
}

#[test]
fn test_run_records_failed_operation() {
    let ws = Workspace::new(json!({"bookings_new": "503 Service Unavailable"}));

    let (code, stdout, _) = run_probes(&ws, &[]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Failed: 1"));

    let report = read_json(&ws.path("report.json"));
    let expected = "Current bookings failed: 503 Service Unavailable";
    assert_eq!(
        report["tests"]["current_bookings"],
        json!({"success": false, "error": expected})
    );
    assert_eq!(report["errors"], json!([expected]));
    assert_eq!(report["tests"]["member_detail"]["success"], true);
}

#[test]
fn test_run_mirrors_guarded_failures_when_asked() {
    let ws = Workspace::new(json!({}));
    let mut document = capture_document(json!({}));
    document["records"][1]["performance_summary_id"] = Value::Null;
    std::fs::write(ws.path("capture.json"), document.to_string()).unwrap();

    let (code, _, _) = run_probes(&ws, &["--guarded-failures", "mirror", "--client-version", "0.16.0"]);
    assert_eq!(code, 1);

    let report = read_json(&ws.path("report.json"));
    assert_eq!(report["errors"], json!(["No performance summary ID"]));
    assert_eq!(report["client_version_expected"], "0.16.0");
}

#[test]
fn test_canonicalize_sorts_keys() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.json");
    std::fs::write(&input, r#"{"b": 1, "a": {"d": [2.5, null], "c": "x"}}"#).unwrap();

    let (code, stdout, _) = run_cli(
        command(temp_dir.path()),
        &["canonicalize", input.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "{\n  \"a\": {\n    \"c\": \"x\",\n    \"d\": [\n      2.5,\n      null\n    ]\n  },\n  \"b\": 1\n}\n"
    );
}

#[test]
fn test_canonicalize_rejects_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.json");
    std::fs::write(&input, "{not json").unwrap();

    let (code, _, stderr) = run_cli(
        command(temp_dir.path()),
        &["canonicalize", input.to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid JSON"));
}

#[test]
fn test_summary_of_written_report() {
    let ws = Workspace::new(json!({}));
    assert_eq!(run_probes(&ws, &[]).0, 0);
    let report = ws.path("report.json");

    let (code, stdout, _) = run_cli(
        command(ws.dir.path()),
        &["summary", report.to_str().unwrap(), "--json"],
    );
    assert_eq!(code, 0);
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["total"], 6);
    assert_eq!(summary["failed"], 0);
    let digest = summary["tests"]["member_detail"]["digest"].as_str().unwrap();
    assert_eq!(digest.len(), 43);

    let (code, stdout, _) = run_cli(command(ws.dir.path()), &["summary", report.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("PROBE"));
    assert!(stdout.contains(digest));
}

#[test]
fn test_summary_exit_code_follows_failures() {
    let ws = Workspace::new(json!({"member": "401 Unauthorized"}));
    assert_eq!(run_probes(&ws, &[]).0, 1);

    let (code, stdout, _) = run_cli(
        command(ws.dir.path()),
        &["summary", ws.path("report.json").to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stdout.contains("Member details failed: 401 Unauthorized"));
}

#[test]
fn test_summary_rejects_malformed_report() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report.json");
    std::fs::write(&report, r#"{"errors": []}"#).unwrap();

    let (code, _, stderr) = run_cli(
        command(temp_dir.path()),
        &["summary", report.to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("malformed report"));
}

#[test]
fn test_run_help_lists_possible_values() {
    let temp_dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(command(temp_dir.path()), &["run", "--help"]);
    assert_eq!(code, 0);
    for value in ["unbounded", "enforce", "tests-only", "mirror"] {
        assert!(stdout.contains(value), "missing {} in:\n{}", value, stdout);
    }

    let (code, _, stderr) = run_cli(
        command(temp_dir.path()),
        &["run", "--body-composition-window", "sometimes"],
    );
    assert_eq!(code, 2);
    assert!(stderr.contains("possible values"));
}

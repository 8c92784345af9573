//! Session backed by a recorded capture of API responses.
//!
//! A capture is a JSON document:
//!
//! ```json
//! {
//!   "records": [{"kind": "member", "member_uuid": "..."}, {"kind": "workout", "...": "..."}],
//!   "failures": {"bookings_new": "503 Service Unavailable"}
//! }
//! ```
//!
//! Records are grouped by their `kind` tag when the capture is loaded and
//! decoded with [`parse_record`] only when an operation returns them, so a
//! malformed payload fails that operation alone with [`ClientError::Decode`].
//! An operation listed under `failures` returns a [`ClientError`] carrying
//! the given message.

use crate::errors::{ClientError, SessionError};
use crate::session::{Authenticator, Credentials, FitnessClient};
use chrono::NaiveDate;
use otf_parity_model::{
    parse_record, ApiRecord, BodyCompositionRecord, Booking, Member, ModelError, Workout,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Operation name of [`FitnessClient::member`].
pub const OP_MEMBER: &str = "member";
/// Operation name of [`FitnessClient::workouts`].
pub const OP_WORKOUTS: &str = "workouts";
/// Operation name of [`FitnessClient::body_composition_list`].
pub const OP_BODY_COMPOSITION: &str = "body_composition_list";
/// Operation name of [`FitnessClient::bookings_new`].
pub const OP_BOOKINGS: &str = "bookings_new";

const KIND_MEMBER: &str = "member";
const KIND_WORKOUT: &str = "workout";
const KIND_BODY_COMPOSITION: &str = "body_composition";
const KIND_BOOKING: &str = "booking";

#[derive(Debug, Deserialize)]
struct CaptureFile {
    #[serde(default)]
    records: Vec<Value>,
    #[serde(default)]
    failures: BTreeMap<String, String>,
}

/// Captured payloads grouped by `kind`, in capture order.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    payloads: BTreeMap<String, Vec<Value>>,
    failures: BTreeMap<String, String>,
}

impl Capture {
    /// Groups a capture document by record kind.
    ///
    /// Only the document shape and the `kind` tags are checked here; record
    /// bodies are decoded by the operation that serves them.
    pub fn from_json(document: &Value) -> Result<Self, SessionError> {
        let file = CaptureFile::deserialize(document)?;
        let mut capture = Capture {
            failures: file.failures,
            ..Capture::default()
        };
        for payload in file.records {
            let kind = payload
                .get("kind")
                .and_then(Value::as_str)
                .ok_or(ModelError::MissingKind)?
                .to_string();
            capture.payloads.entry(kind).or_default().push(payload);
        }
        if capture.payloads_of(KIND_MEMBER).len() > 1 {
            warn!("capture holds more than one member; keeping the first");
        }
        for kind in capture.payloads.keys() {
            if ![KIND_MEMBER, KIND_WORKOUT, KIND_BODY_COMPOSITION, KIND_BOOKING].contains(&kind.as_str()) {
                debug!(kind = %kind, "ignoring capture records");
            }
        }
        Ok(capture)
    }

    /// Reads and groups a capture file.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::CaptureIo {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&text)?;
        Self::from_json(&document)
    }

    fn payloads_of(&self, kind: &str) -> &[Value] {
        self.payloads.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Email of the captured member, read without decoding the record.
    fn member_email(&self) -> Option<&str> {
        self.payloads_of(KIND_MEMBER)
            .first()
            .and_then(|payload| payload.get("email"))
            .and_then(Value::as_str)
    }
}

/// [`FitnessClient`] serving responses from a [`Capture`].
#[derive(Debug, Clone)]
pub struct ReplayClient {
    capture: Capture,
}

impl ReplayClient {
    /// Wraps a grouped capture.
    pub fn new(capture: Capture) -> Self {
        Self { capture }
    }

    fn check(&self, operation: &'static str) -> Result<(), ClientError> {
        match self.capture.failures.get(operation) {
            Some(message) => Err(ClientError::Request {
                operation,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Decodes every payload of `kind`, failing the operation on the first bad one.
    fn decode_all<T>(
        &self,
        operation: &'static str,
        kind: &str,
        pick: fn(ApiRecord) -> Option<T>,
    ) -> Result<Vec<T>, ClientError> {
        self.capture
            .payloads_of(kind)
            .iter()
            .filter_map(|payload| match parse_record(payload) {
                Ok(record) => pick(record).map(Ok),
                Err(source) => Some(Err(ClientError::Decode { operation, source })),
            })
            .collect()
    }
}

impl FitnessClient for ReplayClient {
    fn member(&self) -> Result<Member, ClientError> {
        self.check(OP_MEMBER)?;
        let payload = self
            .capture
            .payloads_of(KIND_MEMBER)
            .first()
            .ok_or_else(|| ClientError::Request {
                operation: OP_MEMBER,
                message: "member not found".to_string(),
            })?;
        match parse_record(payload) {
            Ok(ApiRecord::Member(member)) => Ok(member),
            Ok(other) => Err(ClientError::Request {
                operation: OP_MEMBER,
                message: format!("unexpected {} record", other.kind()),
            }),
            Err(source) => Err(ClientError::Decode {
                operation: OP_MEMBER,
                source,
            }),
        }
    }

    fn workouts(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Workout>, ClientError> {
        self.check(OP_WORKOUTS)?;
        let mut workouts = self.decode_all(OP_WORKOUTS, KIND_WORKOUT, |record| match record {
            ApiRecord::Workout(workout) => Some(workout),
            _ => None,
        })?;
        workouts.retain(|w| {
            let day = w.starts_at.date();
            day >= start && day <= end
        });
        Ok(workouts)
    }

    fn body_composition_list(&self) -> Result<Vec<BodyCompositionRecord>, ClientError> {
        self.check(OP_BODY_COMPOSITION)?;
        self.decode_all(OP_BODY_COMPOSITION, KIND_BODY_COMPOSITION, |record| match record {
            ApiRecord::BodyComposition(scan) => Some(scan),
            _ => None,
        })
    }

    fn bookings_new(&self) -> Result<Vec<Booking>, ClientError> {
        self.check(OP_BOOKINGS)?;
        self.decode_all(OP_BOOKINGS, KIND_BOOKING, |record| match record {
            ApiRecord::Booking(booking) => Some(booking),
            _ => None,
        })
    }
}

/// Authenticator that opens a [`ReplayClient`] over a capture file.
#[derive(Debug, Clone)]
pub struct ReplayAuthenticator {
    capture_path: PathBuf,
}

impl ReplayAuthenticator {
    /// Authenticator reading the capture at `capture_path`.
    pub fn new(capture_path: impl Into<PathBuf>) -> Self {
        Self {
            capture_path: capture_path.into(),
        }
    }
}

impl Authenticator for ReplayAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Box<dyn FitnessClient>, SessionError> {
        if credentials.email.trim().is_empty() {
            return Err(SessionError::MissingCredential(crate::session::EMAIL_VAR));
        }
        let capture = Capture::load(&self.capture_path)?;
        if let Some(email) = capture.member_email() {
            if !email.eq_ignore_ascii_case(&credentials.email) {
                return Err(SessionError::Rejected(format!(
                    "capture belongs to a different account than {}",
                    credentials.email
                )));
            }
        }
        Ok(Box::new(ReplayClient::new(capture)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capture() -> Capture {
        Capture::from_json(&json!({
            "records": [
                {"kind": "member", "member_uuid": "m-1", "email": "a@example.com"},
                {"kind": "workout", "class_history_uuid": "w-1", "starts_at": "2024-07-01T06:00:00"},
                {"kind": "workout", "class_history_uuid": "w-2", "starts_at": "2024-08-01T06:00:00"},
                {"kind": "studio", "studio_uuid": "s-1"}
            ],
            "failures": {"bookings_new": "503 Service Unavailable"}
        }))
        .unwrap()
    }

    #[test]
    fn workouts_are_filtered_by_start_date() {
        let client = ReplayClient::new(capture());
        let start = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let workouts = client.workouts(start, end).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].class_history_uuid, "w-2");
    }

    #[test]
    fn listed_failures_surface_as_client_errors() {
        let client = ReplayClient::new(capture());
        let err = client.bookings_new().unwrap_err();
        assert_eq!(err.to_string(), "503 Service Unavailable");
        assert!(client.body_composition_list().unwrap().is_empty());
    }

    #[test]
    fn missing_member_is_an_error() {
        let client = ReplayClient::new(Capture::default());
        assert_eq!(client.member().unwrap_err().to_string(), "member not found");
    }

    #[test]
    fn untagged_records_fail_the_capture() {
        let err = Capture::from_json(&json!({"records": [{"member_uuid": "m"}]})).unwrap_err();
        assert!(matches!(err, SessionError::CaptureRecord(ModelError::MissingKind)));
    }

    #[test]
    fn malformed_payload_fails_only_its_operation() {
        let capture = Capture::from_json(&json!({
            "records": [
                {"kind": "member", "member_uuid": "m-1"},
                {"kind": "body_composition", "member_uuid": "m-1",
                 "scan_datetime": "2024-07-15T07:00:00", "weight": 72.0}
            ]
        }))
        .unwrap();
        let client = ReplayClient::new(capture);

        assert_eq!(client.member().unwrap().member_uuid, "m-1");
        let err = client.body_composition_list().unwrap_err();
        assert!(matches!(
            err,
            ClientError::Decode { operation: OP_BODY_COMPOSITION, .. }
        ));
        assert!(err
            .to_string()
            .starts_with("invalid response from body_composition_list: deserialization error: missing field `body_fat_percent`"));
    }

    #[test]
    fn malformed_member_is_a_decode_error() {
        let capture = Capture::from_json(&json!({
            "records": [{"kind": "member", "email": "a@example.com"}]
        }))
        .unwrap();
        let err = ReplayClient::new(capture).member().unwrap_err();
        assert!(matches!(err, ClientError::Decode { operation: OP_MEMBER, .. }));
    }

    #[test]
    fn authenticator_checks_the_captured_account() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("capture.json");
        std::fs::write(
            &path,
            json!({"records": [{"kind": "member", "member_uuid": "m-1", "email": "A@example.com"}]})
                .to_string(),
        )
        .unwrap();
        let auth = ReplayAuthenticator::new(&path);

        let ok = Credentials::new("a@example.com", None).unwrap();
        assert!(auth.authenticate(&ok).is_ok());

        let other = Credentials::new("b@example.com", None).unwrap();
        match auth.authenticate(&other) {
            Err(SessionError::Rejected(message)) => assert!(message.contains("b@example.com")),
            Err(err) => panic!("unexpected error: {}", err),
            Ok(_) => panic!("session accepted for another account"),
        }
    }
}

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use otf_parity_harness::{
    ClientError, FitnessClient, FixedClock, Harness, HarnessConfig, Report,
};
use otf_parity_model::{BodyCompositionRecord, Booking, Member, Workout};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub type Calls = Rc<RefCell<Vec<String>>>;

/// Scripted client; `Err` entries are returned as request failures.
#[derive(Clone)]
pub struct FakeClient {
    pub member: Result<Member, String>,
    pub workouts: Result<Vec<Workout>, String>,
    pub body_composition: Result<Vec<BodyCompositionRecord>, String>,
    pub bookings: Result<Vec<Booking>, String>,
    pub calls: Calls,
}

fn respond<T: Clone>(
    calls: &Calls,
    operation: &'static str,
    scripted: &Result<T, String>,
) -> Result<T, ClientError> {
    calls.borrow_mut().push(operation.to_string());
    scripted.clone().map_err(|message| ClientError::Request { operation, message })
}

impl FitnessClient for FakeClient {
    fn member(&self) -> Result<Member, ClientError> {
        respond(&self.calls, "member", &self.member)
    }

    fn workouts(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Workout>, ClientError> {
        self.calls
            .borrow_mut()
            .push(format!("workouts {} {}", start, end));
        self.workouts
            .clone()
            .map_err(|message| ClientError::Request { operation: "workouts", message })
    }

    fn body_composition_list(&self) -> Result<Vec<BodyCompositionRecord>, ClientError> {
        respond(&self.calls, "body_composition_list", &self.body_composition)
    }

    fn bookings_new(&self) -> Result<Vec<Booking>, ClientError> {
        respond(&self.calls, "bookings_new", &self.bookings)
    }
}

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

pub fn member(with_home_studio: bool) -> Member {
    let mut payload = json!({
        "member_uuid": "m-123",
        "member_id": 4411,
        "first_name": "Jordan",
        "last_name": "Lee",
        "email": "jordan@example.com"
    });
    if with_home_studio {
        payload["home_studio"] = json!({
            "studio_uuid": "s-9",
            "name": "Downtown",
            "status": "Active"
        });
    }
    from_json(payload)
}

pub fn workout(id: &str, calories: Option<i64>, summary_id: Option<&str>) -> Workout {
    from_json(json!({
        "class_history_uuid": id,
        "performance_summary_id": summary_id,
        "starts_at": "2024-07-29T06:15:00",
        "calories_burned": calories,
        "splat_points": 12
    }))
}

pub fn scan(day: &str, weight: f64) -> BodyCompositionRecord {
    from_json(json!({
        "member_uuid": "m-123",
        "scan_datetime": format!("{}T07:00:00", day),
        "weight": weight,
        "body_fat_percent": 18.5,
        "skeletal_muscle_mass": 33.0
    }))
}

pub fn booking(id: &str) -> Booking {
    from_json(json!({
        "booking_uuid": id,
        "status": "Booked",
        "starts_at": "2024-08-03T08:00:00"
    }))
}

/// A client on which every probe succeeds.
pub fn healthy_client() -> FakeClient {
    FakeClient {
        member: Ok(member(true)),
        workouts: Ok(vec![
            workout("w-1", Some(512), Some("ps-1")),
            workout("w-2", Some(430), Some("ps-2")),
        ]),
        body_composition: Ok(vec![scan("2024-07-15", 72.0), scan("2023-01-10", 75.5)]),
        bookings: Ok(vec![booking("b-1")]),
        calls: Rc::new(RefCell::new(Vec::new())),
    }
}

pub fn run_with(client: FakeClient, config: HarnessConfig) -> Report {
    Harness::new(Box::new(client), config)
        .with_clock(FixedClock(now()))
        .run(&otf_parity_harness::standard_probes())
        .unwrap()
}

//! The fixed probe battery.
//!
//! Probes run in the order returned by [`standard_probes`]. Report keys and
//! failure prefixes are stable so reports from different clients line up.

use crate::config::BodyCompositionWindow;
use crate::errors::ProbeError;
use crate::outcome::ProbeSuccess;
use crate::probe::{Probe, ProbeContext};
use chrono::{Duration, NaiveDateTime};
use otf_parity_canonical::temporal::iso_datetime;
use otf_parity_canonical::{canonicalize, CanonicalMap, CanonicalValue, ProbeName};
use otf_parity_model::Workout;
use tracing::{debug, info};

/// Member detail probe key.
pub const MEMBER_DETAIL: &str = "member_detail";
/// Home studio probe key.
pub const HOME_STUDIO_DETAIL: &str = "home_studio_detail";
/// Recent workouts probe key.
pub const RECENT_WORKOUTS: &str = "recent_workouts";
/// Performance summary probe key.
pub const PERFORMANCE_SUMMARY: &str = "performance_summary";
/// Body composition probe key.
pub const BODY_COMPOSITION: &str = "body_composition";
/// Current bookings probe key.
pub const CURRENT_BOOKINGS: &str = "current_bookings";

/// Guard message when the member has no home studio.
pub const NO_HOME_STUDIO: &str = "No home studio";
/// Guard message when no filtered workout is available.
pub const NO_WORKOUTS: &str = "No workouts available";
/// Guard message when the first workout lacks a summary id.
pub const NO_PERFORMANCE_SUMMARY_ID: &str = "No performance summary ID";

/// The six probes, in run order.
pub fn standard_probes() -> Vec<Probe> {
    vec![
        probe(MEMBER_DETAIL, "Member details failed", member_detail),
        probe(HOME_STUDIO_DETAIL, "Home studio failed", home_studio_detail),
        probe(RECENT_WORKOUTS, "Recent workouts failed", recent_workouts),
        probe(PERFORMANCE_SUMMARY, "Performance summary failed", performance_summary),
        probe(BODY_COMPOSITION, "Body composition failed", body_composition),
        probe(CURRENT_BOOKINGS, "Current bookings failed", current_bookings),
    ]
}

fn probe(
    name: &'static str,
    prefix: &'static str,
    execute: fn(&ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError>,
) -> Probe {
    let name = ProbeName::parse(name).expect("built-in probe names are valid");
    Probe::new(name, prefix, execute)
}

/// Splits workouts into those kept and the number dropped as noise.
///
/// A workout is dropped only when its calorie count is present and below
/// `floor`; workouts without a calorie count are kept.
pub fn filter_by_calories(workouts: Vec<Workout>, floor: i64) -> (Vec<Workout>, usize) {
    let original = workouts.len();
    let kept: Vec<Workout> = workouts
        .into_iter()
        .filter(|workout| match workout.calories_burned {
            Some(calories) if calories < floor => {
                debug!(
                    class_history_uuid = %workout.class_history_uuid,
                    calories,
                    "dropping workout below calorie floor"
                );
                false
            }
            _ => true,
        })
        .collect();
    let dropped = original - kept.len();
    (kept, dropped)
}

fn date_range(start: &NaiveDateTime, end: &NaiveDateTime) -> CanonicalMap {
    let mut range = CanonicalMap::new();
    range.insert("start", iso_datetime(start));
    range.insert("end", iso_datetime(end));
    range
}

fn field_or_null(value: Option<&CanonicalValue>) -> CanonicalValue {
    value.cloned().unwrap_or(CanonicalValue::Null)
}

/// Truthiness of a canonical leaf: null, empty and zero values are absent.
fn is_present(value: &CanonicalValue) -> bool {
    match value {
        CanonicalValue::Null => false,
        CanonicalValue::Bool(b) => *b,
        CanonicalValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        CanonicalValue::String(s) => !s.is_empty(),
        CanonicalValue::Map(map) => !map.is_empty(),
        CanonicalValue::Sequence(items) => !items.is_empty(),
    }
}

fn member_detail(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let member = ctx.client.member()?;
    let data = canonicalize(&member);
    let member_uuid = field_or_null(data.get("member_uuid"));
    let home_studio_uuid = field_or_null(data.get("home_studio").and_then(|s| s.get("studio_uuid")));
    info!(
        first_name = member.first_name.as_deref().unwrap_or(""),
        last_name = member.last_name.as_deref().unwrap_or(""),
        "member fetched"
    );
    Ok(ProbeSuccess::new(data)
        .with("member_uuid", member_uuid)
        .with("home_studio_uuid", home_studio_uuid))
}

fn home_studio_detail(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let member = ctx.client.member()?;
    let studio = member
        .home_studio
        .ok_or_else(|| ProbeError::no_data(NO_HOME_STUDIO))?;
    info!(name = studio.name.as_deref().unwrap_or(""), "home studio fetched");
    let studio_uuid = studio.studio_uuid.clone();
    Ok(ProbeSuccess::of(&studio).with("studio_uuid", studio_uuid))
}

fn recent_workouts(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let end = ctx.clock.now();
    let start = end - Duration::days(ctx.config.workout_window_days);
    let workouts = ctx.client.workouts(start.date(), end.date())?;
    let original_count = workouts.len();
    let (kept, dropped) = filter_by_calories(workouts, ctx.config.calorie_floor);
    info!(
        count = kept.len(),
        original_count,
        dropped,
        "recent workouts fetched"
    );
    Ok(ProbeSuccess::of(&kept)
        .with("count", kept.len())
        .with("filtered_count", kept.len())
        .with("original_count", original_count)
        .with("date_range", date_range(&start, &end)))
}

fn performance_summary(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let workouts = ctx
        .report
        .outcome(RECENT_WORKOUTS)
        .and_then(|outcome| outcome.data())
        .and_then(CanonicalValue::as_sequence)
        .unwrap_or(&[]);
    let first = workouts
        .first()
        .ok_or_else(|| ProbeError::no_data(NO_WORKOUTS))?;
    let summary_id = first
        .get("performance_summary_id")
        .filter(|id| is_present(id))
        .cloned()
        .ok_or_else(|| ProbeError::no_data(NO_PERFORMANCE_SUMMARY_ID))?;
    info!(calories = ?first.get("calories_burned"), "performance summary derived");
    Ok(ProbeSuccess::of(first).with("performance_summary_id", summary_id))
}

fn body_composition(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let end = ctx.clock.now();
    let start = end - Duration::days(ctx.config.body_composition_window_days);
    let mut scans = ctx.client.body_composition_list()?;
    if ctx.config.body_composition_window == BodyCompositionWindow::Enforce {
        let (from, to) = (start.date(), end.date());
        scans.retain(|scan| {
            let day = scan.scan_datetime.date();
            day >= from && day <= to
        });
    }
    info!(count = scans.len(), window = ?ctx.config.body_composition_window, "body composition fetched");
    Ok(ProbeSuccess::of(&scans)
        .with("count", scans.len())
        .with("date_range", date_range(&start, &end)))
}

fn current_bookings(ctx: &ProbeContext<'_>) -> Result<ProbeSuccess, ProbeError> {
    let bookings = ctx.client.bookings_new()?;
    info!(count = bookings.len(), "current bookings fetched");
    Ok(ProbeSuccess::of(&bookings).with("count", bookings.len()))
}

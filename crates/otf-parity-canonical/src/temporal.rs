use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike};

/// Renders a calendar date as `YYYY-MM-DD`.
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Renders a naive datetime as `YYYY-MM-DDTHH:MM:SS`, with a six-digit
/// microsecond fraction only when the sub-second part is non-zero.
pub fn iso_datetime(value: &NaiveDateTime) -> String {
    let mut out = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    let micros = value.nanosecond() % 1_000_000_000 / 1_000;
    if micros != 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}

/// Renders a zoned datetime in its own offset, suffixed with `±HH:MM`, or
/// `±HH:MM:SS` when the offset has a seconds part.
pub fn iso_zoned<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let offset = value.offset().fix();
    let local = value.with_timezone(&offset).naive_local();
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let seconds = total.abs();
    let mut out = format!(
        "{}{}{:02}:{:02}",
        iso_datetime(&local),
        sign,
        seconds / 3600,
        seconds % 3600 / 60
    );
    if seconds % 60 != 0 {
        out.push_str(&format!(":{:02}", seconds % 60));
    }
    out
}

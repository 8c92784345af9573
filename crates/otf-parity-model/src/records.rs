use crate::enums::{BookingStatus, Gender, StudioStatus};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use otf_parity_canonical::canonical_record;
use serde::Deserialize;
use serde_json::Value;

/// Postal address of a studio.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Address {
    /// First address line.
    pub line1: Option<String>,
    /// Second address line.
    #[serde(default)]
    pub line2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Country name or code.
    #[serde(default)]
    pub country: Option<String>,
}

canonical_record!(Address { line1, line2, city, state, postal_code, country });

/// A studio location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Studio {
    /// Studio identifier.
    pub studio_uuid: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// IANA time zone name.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Operating status.
    #[serde(default)]
    pub status: Option<StudioStatus>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<Address>,
    /// Latitude in degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Payload this record was parsed from.
    #[serde(skip)]
    pub raw: Option<Value>,
}

canonical_record!(
    Studio { studio_uuid, name, time_zone, email, phone_number, status, address, latitude, longitude }
    internal { raw }
);

/// The signed-in member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Member {
    /// Member identifier.
    pub member_uuid: String,
    /// Numeric member id.
    #[serde(default)]
    pub member_id: Option<i64>,
    /// Identity-provider subject.
    #[serde(default)]
    pub cognito_id: Option<String>,
    /// Home studio relation.
    #[serde(default)]
    pub home_studio: Option<Studio>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Reported gender.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Preferred locale.
    #[serde(default)]
    pub locale: Option<String>,
    /// Account creation time.
    #[serde(default)]
    pub created_date: Option<NaiveDateTime>,
    /// Payload this record was parsed from.
    #[serde(skip)]
    pub raw: Option<Value>,
}

canonical_record!(
    Member {
        member_uuid, member_id, cognito_id, home_studio, first_name, last_name, email,
        phone_number, birthday, gender, locale, created_date
    }
    internal { raw }
);

/// Heart-rate summary of a workout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeartRate {
    /// Configured maximum heart rate.
    #[serde(default)]
    pub max_hr: Option<i64>,
    /// Peak heart rate reached.
    #[serde(default)]
    pub peak_hr: Option<i64>,
    /// Peak as a percentage of max.
    #[serde(default)]
    pub peak_hr_percent: Option<i64>,
    /// Average heart rate.
    #[serde(default)]
    pub avg_hr: Option<i64>,
    /// Average as a percentage of max.
    #[serde(default)]
    pub avg_hr_percent: Option<i64>,
}

canonical_record!(HeartRate { max_hr, peak_hr, peak_hr_percent, avg_hr, avg_hr_percent });

/// Minutes spent in each heart-rate zone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneTimeMinutes {
    /// Gray zone.
    #[serde(default)]
    pub gray: i64,
    /// Blue zone.
    #[serde(default)]
    pub blue: i64,
    /// Green zone.
    #[serde(default)]
    pub green: i64,
    /// Orange zone.
    #[serde(default)]
    pub orange: i64,
    /// Red zone.
    #[serde(default)]
    pub red: i64,
}

canonical_record!(ZoneTimeMinutes { gray, blue, green, orange, red });

/// One attended class with its tracked performance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workout {
    /// Identifier of the performance summary, when one was recorded.
    #[serde(default)]
    pub performance_summary_id: Option<String>,
    /// Class history identifier.
    pub class_history_uuid: String,
    /// Class name.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Coach name.
    #[serde(default)]
    pub coach: Option<String>,
    /// Studio the class took place at.
    #[serde(default)]
    pub studio: Option<Studio>,
    /// Class start in studio-local time.
    pub starts_at: NaiveDateTime,
    /// Calories burned; absent when no tracker was worn.
    #[serde(default)]
    pub calories_burned: Option<i64>,
    /// Minutes in the orange and red zones.
    #[serde(default)]
    pub splat_points: Option<i64>,
    /// Steps counted.
    #[serde(default)]
    pub step_count: Option<i64>,
    /// Active time in seconds.
    #[serde(default)]
    pub active_time_seconds: Option<i64>,
    /// Heart-rate summary.
    #[serde(default)]
    pub heart_rate: Option<HeartRate>,
    /// Zone breakdown.
    #[serde(default)]
    pub zone_time_minutes: Option<ZoneTimeMinutes>,
    /// Payload this record was parsed from.
    #[serde(skip)]
    pub raw: Option<Value>,
}

canonical_record!(
    Workout {
        performance_summary_id, class_history_uuid, class_name, coach, studio, starts_at,
        calories_burned, splat_points, step_count, active_time_seconds, heart_rate,
        zone_time_minutes
    }
    internal { raw }
);

/// One body-composition scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyCompositionRecord {
    /// Member the scan belongs to.
    pub member_uuid: String,
    /// Numeric member id.
    #[serde(default)]
    pub member_id: Option<i64>,
    /// Scan time.
    pub scan_datetime: NaiveDateTime,
    /// Body weight.
    pub weight: f64,
    /// Body fat percentage.
    pub body_fat_percent: f64,
    /// Skeletal muscle mass.
    pub skeletal_muscle_mass: f64,
    /// Total body water.
    #[serde(default)]
    pub total_body_water: Option<f64>,
    /// Lean body mass.
    #[serde(default)]
    pub lean_body_mass: Option<f64>,
    /// Body fat mass.
    #[serde(default)]
    pub body_fat_mass: Option<f64>,
    /// Visceral fat level.
    #[serde(default)]
    pub visceral_fat_level: Option<f64>,
    /// Basal metabolic rate.
    #[serde(default)]
    pub basal_metabolic_rate: Option<i64>,
    /// Gender recorded at scan time.
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Payload this record was parsed from.
    #[serde(skip)]
    pub raw: Option<Value>,
}

canonical_record!(
    BodyCompositionRecord {
        member_uuid, member_id, scan_datetime, weight, body_fat_percent, skeletal_muscle_mass,
        total_body_water, lean_body_mass, body_fat_mass, visceral_fat_level,
        basal_metabolic_rate, gender
    }
    internal { raw }
);

/// A class booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Booking {
    /// Booking identifier.
    pub booking_uuid: String,
    /// Class identifier.
    #[serde(default)]
    pub class_uuid: Option<String>,
    /// Class name.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Booking state.
    pub status: BookingStatus,
    /// Class start in studio-local time.
    pub starts_at: NaiveDateTime,
    /// Class end in studio-local time.
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
    /// Coach name.
    #[serde(default)]
    pub coach: Option<String>,
    /// Studio hosting the class.
    #[serde(default)]
    pub studio: Option<Studio>,
    /// Waitlist position, when waitlisted.
    #[serde(default)]
    pub waitlist_position: Option<i64>,
    /// Whether this is an introductory class.
    #[serde(default)]
    pub is_intro: bool,
    /// When the booking was made.
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Payload this record was parsed from.
    #[serde(skip)]
    pub raw: Option<Value>,
}

canonical_record!(
    Booking {
        booking_uuid, class_uuid, class_name, status, starts_at, ends_at, coach, studio,
        waitlist_position, is_intro, created_at
    }
    internal { raw }
);

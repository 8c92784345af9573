//! Typed record parsing from JSON payloads.

use crate::errors::ModelError;
use crate::records::{BodyCompositionRecord, Booking, Member, Studio, Workout};
use otf_parity_canonical::{CanonicalValue, Canonicalize};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Closed set of response records the client can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRecord {
    /// Member detail.
    Member(Member),
    /// Studio detail.
    Studio(Studio),
    /// Workout with performance data.
    Workout(Workout),
    /// Body-composition scan.
    BodyComposition(BodyCompositionRecord),
    /// Class booking.
    Booking(Booking),
    /// Record with an unrecognized kind, kept verbatim.
    Unknown(Value),
}

impl ApiRecord {
    /// The `kind` tag this variant is parsed from.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiRecord::Member(_) => "member",
            ApiRecord::Studio(_) => "studio",
            ApiRecord::Workout(_) => "workout",
            ApiRecord::BodyComposition(_) => "body_composition",
            ApiRecord::Booking(_) => "booking",
            ApiRecord::Unknown(_) => "unknown",
        }
    }
}

impl Canonicalize for ApiRecord {
    fn canonicalize(&self) -> CanonicalValue {
        match self {
            ApiRecord::Member(member) => member.canonicalize(),
            ApiRecord::Studio(studio) => studio.canonicalize(),
            ApiRecord::Workout(workout) => workout.canonicalize(),
            ApiRecord::BodyComposition(scan) => scan.canonicalize(),
            ApiRecord::Booking(booking) => booking.canonicalize(),
            ApiRecord::Unknown(value) => value.canonicalize(),
        }
    }
}

/// Parses a tagged JSON payload into a typed record.
///
/// Inspects the `kind` field to pick the variant, then deserializes the
/// payload into that record and keeps the payload in its internal `raw`
/// slot. Unrecognized kinds become [`ApiRecord::Unknown`].
pub fn parse_record(json: &Value) -> Result<ApiRecord, ModelError> {
    let kind = json
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or(ModelError::MissingKind)?;

    let record = match kind {
        "member" => {
            let mut member: Member = decode(json)?;
            member.raw = Some(json.clone());
            ApiRecord::Member(member)
        }
        "studio" => {
            let mut studio: Studio = decode(json)?;
            studio.raw = Some(json.clone());
            ApiRecord::Studio(studio)
        }
        "workout" => {
            let mut workout: Workout = decode(json)?;
            workout.raw = Some(json.clone());
            ApiRecord::Workout(workout)
        }
        "body_composition" => {
            let mut scan: BodyCompositionRecord = decode(json)?;
            scan.raw = Some(json.clone());
            ApiRecord::BodyComposition(scan)
        }
        "booking" => {
            let mut booking: Booking = decode(json)?;
            booking.raw = Some(json.clone());
            ApiRecord::Booking(booking)
        }
        _ => ApiRecord::Unknown(json.clone()),
    };
    Ok(record)
}

fn decode<T: DeserializeOwned>(json: &Value) -> Result<T, ModelError> {
    Ok(T::deserialize(json)?)
}
